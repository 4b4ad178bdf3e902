//! Shared configuration for edmhome.
//!
//! One YAML (or TOML) document names the hutch, the device database, the
//! static screen directory, and the device filters. Environment variables
//! prefixed `EDMHOME_` overlay the file; nested keys use `__`
//! (`EDMHOME_VIEWER__EXECUTABLE=edm`). The CLI layers its flags on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use edmhome_core::{AttributeFilter, LoadOptions};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to serialize config: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Hutch name; also the default `beamline` scope of the device query.
    pub hutch: Option<String>,

    /// Directory that relative `embedded_screen` paths resolve against.
    pub static_dir: Option<PathBuf>,

    /// JSON device database file.
    pub database: Option<PathBuf>,

    /// Where `edmhome build` writes screens.
    pub build_dir: Option<PathBuf>,

    #[serde(default)]
    pub viewer: ViewerSettings,

    #[serde(default)]
    pub filters: Filters,
}

/// External display manager invocation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewerSettings {
    #[serde(default = "default_executable")]
    pub executable: String,

    #[serde(default = "default_viewer_args")]
    pub args: Vec<String>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            args: default_viewer_args(),
        }
    }
}

fn default_executable() -> String {
    "edm".into()
}
fn default_viewer_args() -> Vec<String> {
    vec!["-x".into(), "-eolc".into()]
}

/// Device query filters, attribute name → value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Filters {
    #[serde(default)]
    pub include: AttributeFilter,

    #[serde(default)]
    pub exclude: AttributeFilter,
}

impl Config {
    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hutch.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(ConfigError::Validation {
                field: "hutch".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.viewer.executable.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "viewer.executable".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Translate into loader options.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            hutch: self.hutch.clone(),
            include: non_empty(&self.filters.include),
            exclude: non_empty(&self.filters.exclude),
        }
    }
}

fn non_empty(filter: &AttributeFilter) -> Option<AttributeFilter> {
    (!filter.is_empty()).then(|| filter.clone())
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "edmhome", "edmhome").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.yaml");
            p
        },
        |dirs| dirs.config_dir().join("config.yaml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("edmhome");
    p
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from file + environment.
///
/// An explicit `path` must exist. Without one, the platform default is
/// used if present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => {
            return Err(ConfigError::NotFound { path: p.to_path_buf() });
        }
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };
    debug!(path = %path.display(), exists = path.exists(), "loading config");

    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
    figment = if is_toml(&path) {
        figment.merge(Toml::file(&path))
    } else {
        figment.merge(Yaml::file(&path))
    };
    figment = figment.merge(Env::prefixed("EDMHOME_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to YAML (or TOML, by extension) and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = if is_toml(path) {
        toml::to_string_pretty(cfg)?
    } else {
        serde_yaml::to_string(cfg)?
    };
    std::fs::write(path, text)?;
    Ok(())
}
