//! `edmhome build`: write screens into a build directory.

use std::path::PathBuf;

use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use edmhome_edm::screen_for;

use crate::cli::{BuildArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct BuiltFile {
    path: PathBuf,
    root: bool,
}

#[derive(Tabled)]
struct BuiltRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Root")]
    root: &'static str,
}

pub fn handle(args: &BuildArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let dir = config::build_dir(&cfg, args.build_dir.as_deref())?;
    let layout = config::load_layout(&cfg, global)?;
    let group = config::select(&layout, args.stand.as_deref())?;

    let window = screen_for(group, &config::screen_settings(&cfg))?;
    let written = window.save(&dir, args.name.as_deref())?;
    info!(dir = %dir.display(), files = written.len(), "build complete");

    // Root is written last.
    let last = written.len().saturating_sub(1);
    let files: Vec<BuiltFile> = written
        .into_iter()
        .enumerate()
        .map(|(i, path)| BuiltFile { path, root: i == last })
        .collect();

    let out = output::render_list(
        &global.output,
        &files,
        |f| BuiltRow {
            file: f.path.display().to_string(),
            root: if f.root { "✓" } else { "" },
        },
        |f| f.path.display().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
