//! `edmhome show`: open screens in the viewer and wait for it.

use tracing::info;

use edmhome_edm::screen_for;

use crate::cli::{GlobalOpts, ShowArgs};
use crate::config;
use crate::error::CliError;

pub async fn handle(args: &ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let layout = config::load_layout(&cfg, global)?;
    let group = config::select(&layout, args.stand.as_deref())?;
    let window = screen_for(group, &config::screen_settings(&cfg))?;

    let viewer = config::viewer(&cfg, args.viewer.as_deref());
    let session = viewer.launch(&window)?;
    info!(pid = ?session.pid(), screen = window.alias(), "waiting for viewer");

    // Temp files are removed by the session's watcher once the viewer exits.
    let status = session.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::ViewerFailed {
            status: status.to_string(),
        })
    }
}
