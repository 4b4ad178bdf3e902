//! CLI error types with miette diagnostics.
//!
//! Maps the library errors into user-facing errors with actionable help
//! text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use edmhome_config::ConfigError;
use edmhome_core::CoreError;
use edmhome_edm::EdmError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 6;
    pub const VIEWER: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Device selection ─────────────────────────────────────────────

    #[error("No devices found for hutch '{hutch}'")]
    #[diagnostic(
        code(edmhome::no_devices),
        help(
            "Check filters.include / filters.exclude in the config, or the hutch name.\n\
             Without an explicit include filter the query is beamline = <hutch>."
        )
    )]
    NoDevices { hutch: String },

    #[error("Device '{device}' has no stand assigned")]
    #[diagnostic(
        code(edmhome::missing_stand),
        help("Every device in the hutch needs a `stand` in the device database.")
    )]
    MissingStand { device: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(edmhome::not_found),
        help("Run: edmhome {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Cannot group devices: {message}")]
    #[diagnostic(code(edmhome::structure))]
    Structure { message: String },

    // ── Device database ──────────────────────────────────────────────

    #[error("No device database configured")]
    #[diagnostic(
        code(edmhome::no_database),
        help(
            "Pass --database <file>, set EDMHOME_DATABASE, or add `database:` to\n\
             the config at {path}"
        )
    )]
    NoDatabase { path: String },

    #[error("{message}")]
    #[diagnostic(
        code(edmhome::database),
        help("The database is a JSON object keyed by device name.")
    )]
    Database { message: String },

    // ── Screens ──────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(edmhome::screen),
        help("Relative device screens resolve against static_dir; check --static-dir.")
    )]
    Screen { message: String },

    #[error("{message}")]
    #[diagnostic(code(edmhome::write))]
    Write { message: String },

    // ── Viewer ───────────────────────────────────────────────────────

    #[error("Could not start viewer '{executable}'")]
    #[diagnostic(
        code(edmhome::viewer_launch),
        help(
            "Install EDM or point viewer.executable (or --viewer) at it.\n\
             Use `edmhome build` to write the screens without a viewer."
        )
    )]
    ViewerLaunch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Viewer exited with {status}")]
    #[diagnostic(code(edmhome::viewer_failed))]
    ViewerFailed { status: String },

    #[error("{message}")]
    #[diagnostic(code(edmhome::viewer))]
    Viewer { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(edmhome::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(edmhome::no_config),
        help("Create one with: edmhome config init")
    )]
    NoConfig { path: String },

    #[error("Configuration file already exists: {path}")]
    #[diagnostic(
        code(edmhome::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(edmhome::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    #[diagnostic(code(edmhome::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    #[diagnostic(code(edmhome::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDevices { .. } | Self::NotFound { .. } | Self::Screen { .. } => {
                exit_code::NOT_FOUND
            }
            Self::MissingStand { .. }
            | Self::NoDatabase { .. }
            | Self::Database { .. }
            | Self::NoConfig { .. }
            | Self::Config(_) => exit_code::CONFIG,
            Self::ViewerLaunch { .. } | Self::ViewerFailed { .. } | Self::Viewer { .. } => {
                exit_code::VIEWER
            }
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error → CliError mapping ─────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            // The hutch name is filled in by the caller, which knows it.
            CoreError::NoDevices => CliError::NoDevices {
                hutch: edmhome_core::DEFAULT_HUTCH.into(),
            },

            CoreError::MissingStand { device } => CliError::MissingStand { device },

            CoreError::SubgroupNotFound { group, alias } => CliError::NotFound {
                resource_type: format!("Subgroup of {group}"),
                identifier: alias,
                list_command: "tree".into(),
            },

            err @ (CoreError::DatabaseRead { .. }
            | CoreError::DatabaseFormat { .. }
            | CoreError::DeviceRecord { .. }) => CliError::Database {
                message: err.to_string(),
            },

            err @ (CoreError::EmptyGroupName
            | CoreError::DuplicateAlias { .. }
            | CoreError::ReservedAlias { .. }
            | CoreError::NoSubgroups { .. }) => CliError::Structure {
                message: err.to_string(),
            },
        }
    }
}

impl From<EdmError> for CliError {
    fn from(err: EdmError) -> Self {
        match err {
            EdmError::Core(core) => core.into(),
            EdmError::ViewerSpawn { executable, source } => {
                CliError::ViewerLaunch { executable, source }
            }
            err @ (EdmError::ScreenRead { .. } | EdmError::ScreenSize { .. }) => {
                CliError::Screen {
                    message: err.to_string(),
                }
            }
            err @ (EdmError::Write { .. } | EdmError::DuplicateDisplay { .. }) => CliError::Write {
                message: err.to_string(),
            },
            err @ (EdmError::ViewerWait(_) | EdmError::Watcher(_)) => CliError::Viewer {
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
