// ── Core error types ──
//
// Configuration errors (nothing to group, records that cannot be placed)
// and structural errors (groups that violate their invariants). Both are
// fatal at the call site; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("No devices found matching device filters")]
    NoDevices,

    #[error("Device '{device}' has no stand assigned")]
    MissingStand { device: String },

    // ── Structural errors ────────────────────────────────────────────
    #[error("Group name cannot be empty")]
    EmptyGroupName,

    #[error("Group '{group}' has more than one subgroup with alias '{alias}'")]
    DuplicateAlias { group: String, alias: String },

    #[error("Group '{group}' has a subgroup aliased '{alias}', which its selector reserves")]
    ReservedAlias { group: String, alias: String },

    #[error("Group '{group}' has no subgroups to control")]
    NoSubgroups { group: String },

    #[error("Group '{group}' has no subgroup '{alias}'")]
    SubgroupNotFound { group: String, alias: String },

    // ── Device database errors ───────────────────────────────────────
    #[error("Cannot read device database {path}: {source}")]
    DatabaseRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed device database {path}: {source}")]
    DatabaseFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed record for device '{name}': {source}")]
    DeviceRecord {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
