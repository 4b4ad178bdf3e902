// ── Domain model ──
//
// Devices come from the device database and never change. Groups are
// assembled once by the loader and handed to the renderer read-only.

pub mod device;
pub mod group;
pub mod selector;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::Device;
pub use group::{Child, Group, GroupKind};
pub use selector::{OVERVIEW_STATE, Selector};
