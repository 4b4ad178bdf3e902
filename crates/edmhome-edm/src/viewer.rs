// ── EDM viewer launch ──
//
// Screens are rendered into temp files, the viewer is started on the root
// file, and a watcher task owns the temp files until the viewer exits.
// There is one watcher per launch and no cancellation.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::EdmError;
use crate::screens::Window;

/// External display manager command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    executable: String,
    args: Vec<String>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            executable: "edm".into(),
            args: vec!["-x".into(), "-eolc".into()],
        }
    }
}

impl Viewer {
    pub fn new(executable: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            executable: executable.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render `window` to temp files and open it.
    ///
    /// Must be called from within a tokio runtime. The temp files are
    /// deleted once the viewer exits, whether or not the session is
    /// awaited.
    pub fn launch(&self, window: &Window) -> Result<ViewerSession, EdmError> {
        let screen = window.render_temporary()?;
        let root = screen.root().to_path_buf();

        let mut child = Command::new(&self.executable)
            .args(&self.args)
            .arg(&root)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| EdmError::ViewerSpawn {
                executable: self.executable.clone(),
                source,
            })?;

        let pid = child.id();
        info!(executable = %self.executable, ?pid, root = %root.display(), "viewer launched");

        let watcher = tokio::spawn(async move {
            let status = child.wait().await;
            match &status {
                Ok(s) => debug!(?pid, status = %s, "viewer exited"),
                Err(e) => warn!(?pid, error = %e, "lost viewer process"),
            }
            debug!(files = screen.len(), "removing temporary displays");
            drop(screen);
            status
        });

        Ok(ViewerSession { pid, root, watcher })
    }
}

/// A running viewer.
#[derive(Debug)]
pub struct ViewerSession {
    pid: Option<u32>,
    root: PathBuf,
    watcher: JoinHandle<std::io::Result<ExitStatus>>,
}

impl ViewerSession {
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Root screen the viewer was opened on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Block until the viewer exits and its temp files are gone.
    pub async fn wait(self) -> Result<ExitStatus, EdmError> {
        self.watcher.await?.map_err(EdmError::ViewerWait)
    }
}
