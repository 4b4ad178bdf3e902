//! Command handlers, one module per subcommand.

pub mod build;
pub mod config_cmd;
pub mod devices;
pub mod show;
pub mod tree;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Build(args) => build::handle(&args, global),
        Command::Show(args) => show::handle(&args, global).await,
        Command::Tree(args) => tree::handle(&args, global),
        Command::Devices(args) => devices::handle(&args, global),
        Command::Config(args) => config_cmd::handle(&args, global),
        // Handled in main before dispatch.
        Command::Completions(_) => Ok(()),
    }
}
