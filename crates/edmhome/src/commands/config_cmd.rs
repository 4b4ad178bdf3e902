//! Config subcommand handlers.

use edmhome_config::{Config, save_config};
use tracing::info;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let yaml = serde_yaml::to_string(&cfg)?;
            let path = config::config_path(global).display().to_string();
            let out = output::render_single(
                &global.output,
                &cfg,
                |_| format!("# {path}\n{}", yaml.trim_end()),
                |_| path.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = starter_config(global);
            cfg.validate()?;
            save_config(&cfg, &path)?;
            info!(path = %path.display(), "config written");
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}

/// Defaults, seeded from whatever flags were given.
fn starter_config(global: &GlobalOpts) -> Config {
    Config {
        hutch: global.hutch.clone(),
        database: global.database.clone(),
        static_dir: global.static_dir.clone(),
        ..Config::default()
    }
}
