//! Effective settings: the config crate's file + env layers, then CLI
//! flags on top, translated into what the library crates take.

use std::path::{Path, PathBuf};

use edmhome_config::Config;
use edmhome_core::{CoreError, Group, HutchLayout, JsonDatabase};
use edmhome_edm::{ScreenSettings, Viewer};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Path of the config file in play: `--config`, or the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(edmhome_config::config_path)
}

/// Load the config and apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = edmhome_config::load_config(global.config.as_deref())?;
    apply_overrides(&mut cfg, global);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref hutch) = global.hutch {
        cfg.hutch = Some(hutch.clone());
    }
    if let Some(ref database) = global.database {
        cfg.database = Some(database.clone());
    }
    if let Some(ref dir) = global.static_dir {
        cfg.static_dir = Some(dir.clone());
    }
}

/// Query the device database and group the hutch.
pub fn load_layout(cfg: &Config, global: &GlobalOpts) -> Result<HutchLayout, CliError> {
    let path = cfg.database.as_deref().ok_or_else(|| CliError::NoDatabase {
        path: config_path(global).display().to_string(),
    })?;
    let db = JsonDatabase::open(path)?;
    let options = cfg.load_options();

    HutchLayout::load(&db, &options).map_err(|err| match err {
        CoreError::NoDevices => CliError::NoDevices {
            hutch: options.hutch_name().to_owned(),
        },
        other => other.into(),
    })
}

/// The hutch root, or one stand of it by name or alias.
pub fn select<'a>(layout: &'a HutchLayout, stand: Option<&str>) -> Result<&'a Group, CliError> {
    match stand {
        Some(stand) => Ok(layout.home().find_subgroup(stand)?),
        None => Ok(layout.home()),
    }
}

pub fn screen_settings(cfg: &Config) -> ScreenSettings {
    match cfg.static_dir {
        Some(ref dir) => ScreenSettings::default().with_static_dir(dir),
        None => ScreenSettings::default(),
    }
}

pub fn viewer(cfg: &Config, executable: Option<&str>) -> Viewer {
    Viewer::new(
        executable.unwrap_or(cfg.viewer.executable.as_str()),
        cfg.viewer.args.iter().cloned(),
    )
}

/// Build directory: the flag, then the config, else an error.
pub fn build_dir(cfg: &Config, flag: Option<&Path>) -> Result<PathBuf, CliError> {
    flag.map(Path::to_path_buf)
        .or_else(|| cfg.build_dir.clone())
        .ok_or_else(|| CliError::Validation {
            field: "build_dir".into(),
            reason: "pass --build-dir or set build_dir in the config".into(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["edmhome"];
        argv.extend_from_slice(args);
        argv.push("tree");
        Cli::parse_from(argv).global
    }

    #[test]
    fn flags_override_file_values() {
        let mut cfg = Config {
            hutch: Some("xpp".into()),
            database: Some("/old.json".into()),
            ..Config::default()
        };
        apply_overrides(&mut cfg, &global(&["--hutch", "mfx", "--static-dir", "/screens"]));

        assert_eq!(cfg.hutch.as_deref(), Some("mfx"));
        assert_eq!(cfg.database, Some(PathBuf::from("/old.json")));
        assert_eq!(cfg.static_dir, Some(PathBuf::from("/screens")));
    }

    #[test]
    fn viewer_flag_replaces_executable_only() {
        let cfg = Config::default();
        let viewer = viewer(&cfg, Some("/opt/edm/bin/edm"));
        assert_eq!(viewer.executable(), "/opt/edm/bin/edm");
        assert_eq!(viewer.args(), ["-x", "-eolc"]);
    }

    #[test]
    fn build_dir_prefers_flag() {
        let cfg = Config {
            build_dir: Some("/from/config".into()),
            ..Config::default()
        };
        assert_eq!(
            build_dir(&cfg, Some(Path::new("/from/flag"))).unwrap(),
            PathBuf::from("/from/flag")
        );
        assert_eq!(build_dir(&cfg, None).unwrap(), PathBuf::from("/from/config"));
        assert!(matches!(
            build_dir(&Config::default(), None),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn static_dir_reaches_screen_settings() {
        let cfg = Config {
            static_dir: Some("/screens".into()),
            ..Config::default()
        };
        let settings = screen_settings(&cfg);
        assert_eq!(
            settings.resolve_screen(Path::new("motor.edl")),
            PathBuf::from("/screens/motor.edl")
        );
    }
}
