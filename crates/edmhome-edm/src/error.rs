use std::path::PathBuf;

use thiserror::Error;

use edmhome_core::CoreError;

#[derive(Debug, Error)]
pub enum EdmError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Cannot read screen {}: {source}", path.display())]
    ScreenRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Screen {} has no size in its header", path.display())]
    ScreenSize { path: PathBuf },

    #[error("Cannot write display {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Display {} would be written twice in one build", path.display())]
    DuplicateDisplay { path: PathBuf },

    #[error("Failed to launch viewer '{executable}': {source}")]
    ViewerSpawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lost track of the viewer process: {0}")]
    ViewerWait(#[source] std::io::Error),

    #[error("Viewer watcher task failed: {0}")]
    Watcher(#[from] tokio::task::JoinError),
}
