//! EDM rendering for edmhome.
//!
//! Builds the operator screens for a hutch tree out of a small set of EDM
//! drawing primitives, writes them as `.edl` files, and launches the EDM
//! viewer on them.
//!
//! - [`widget`] / [`layout`] / [`style`]: drawing primitives and box layout
//! - [`writer`]: `.edl` serialization and screen header parsing
//! - [`screens`]: stand indicator, embedded group, stand and home windows
//! - [`viewer`]: external viewer process with temp-file cleanup

pub mod error;
pub mod layout;
pub mod screens;
pub mod style;
pub mod viewer;
pub mod widget;
pub mod writer;

pub use error::EdmError;
pub use layout::{Arrangement, Item, Layout};
pub use screens::{
    BuildDir, DisplaySink, EmbeddedGroup, ScreenSettings, SubDisplay, TemporaryScreen, Window,
    home_window, screen_for, stand_window,
};
pub use style::{Alignment, Color, Font};
pub use viewer::{Viewer, ViewerSession};
pub use widget::{Display, Geometry, Visibility, Widget};
pub use writer::{Screen, read_screen_size};
