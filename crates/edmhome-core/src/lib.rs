// edmhome-core: device model and hutch grouping shared by the renderer and CLI.

pub mod database;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use database::{DeviceDatabase, JsonDatabase, MemoryDatabase};
pub use error::CoreError;
pub use filter::AttributeFilter;
pub use loader::{DEFAULT_HUTCH, HutchLayout, LoadOptions, group_devices};

// Re-export model types at the crate root for ergonomics.
pub use model::{Child, Device, Group, GroupKind, OVERVIEW_STATE, Selector};
