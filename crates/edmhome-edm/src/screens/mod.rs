// ── Screen builders ──
//
// Everything here consumes the Group contract only: names, aliases,
// selectors, subgroups, and the devices underneath.

mod embedded;
mod indicator;
mod sink;
mod window;

use std::path::{Path, PathBuf};

use edmhome_core::Group;

use crate::error::EdmError;
use crate::style::Color;

pub use embedded::{EmbeddedGroup, array_split, embedded_types};
pub use indicator::{stand_button, stand_indicator};
pub use sink::{BuildDir, DisplaySink, TempDisplays, TemporaryScreen};
pub use window::{SubDisplay, Window, home_window, stand_window};

/// Geometry of the stand indicator lights.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorStyle {
    /// Diameter of one light.
    pub size: i32,
    pub spacing: i32,
    /// Lights per column before a new column starts.
    pub max_col_height: usize,
    /// Extra size of the motion frame around the lights.
    pub frame_margin: i32,
    /// Appended to a motor prefix for the light's alarm PV.
    pub alarm_suffix: String,
    /// Appended to a motor prefix for the motion frame's visibility PV.
    pub motion_suffix: String,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            size: 5,
            spacing: 2,
            max_col_height: 6,
            frame_margin: 4,
            alarm_suffix: ".MSTA".into(),
            motion_suffix: ".DMOV".into(),
        }
    }
}

/// Layout of an embedded group display.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedStyle {
    /// Between the header and each screen-type block.
    pub spacing: i32,
    /// Between device windows.
    pub device_spacing: i32,
    pub margin: i32,
    pub header_height: i32,
    pub theme: Color,
}

impl Default for EmbeddedStyle {
    fn default() -> Self {
        Self {
            spacing: 10,
            device_spacing: 5,
            margin: 5,
            header_height: 25,
            theme: Color::Black,
        }
    }
}

/// Sizes and spacing shared by every screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSettings {
    /// Base for relative `embedded_screen` paths.
    pub static_dir: Option<PathBuf>,
    /// Embedded window of the home screen, `(w, h)`.
    pub home_window: (i32, i32),
    /// Embedded window of a standalone stand screen, `(w, h)`.
    pub stand_window: (i32, i32),
    pub vert_spacing: i32,
    pub horiz_spacing: i32,
    pub indicator: IndicatorStyle,
    pub embedded: EmbeddedStyle,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            static_dir: None,
            home_window: (600, 900),
            stand_window: (600, 1100),
            vert_spacing: 75,
            horiz_spacing: 10,
            indicator: IndicatorStyle::default(),
            embedded: EmbeddedStyle::default(),
        }
    }
}

impl ScreenSettings {
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Resolve a device screen path against `static_dir`.
    pub fn resolve_screen(&self, screen: &Path) -> PathBuf {
        match &self.static_dir {
            Some(dir) if screen.is_relative() => dir.join(screen),
            _ => screen.to_path_buf(),
        }
    }
}

/// The screen a group renders as: the home window for a hutch, a stand
/// window for anything else.
pub fn screen_for(group: &Group, settings: &ScreenSettings) -> Result<Window, EdmError> {
    if group.is_hutch() {
        home_window(group, settings)
    } else {
        stand_window(group, settings)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use std::path::Path;
    use std::sync::Arc;

    use edmhome_core::{Child, Device, Group};

    use crate::writer::Screen;

    /// Blank device screens of three sizes in `dir`.
    pub fn write_device_screens(dir: &Path) {
        for (name, w, h) in [("tiny.edl", 60, 30), ("small.edl", 200, 60), ("large.edl", 400, 100)] {
            let screen = Screen {
                w,
                h,
                widgets: Vec::new(),
            };
            std::fs::write(dir.join(name), screen.to_string()).unwrap();
        }
    }

    /// Six tiny, four small, one large; all motors.
    pub fn device_group() -> Group {
        let screens = ["tiny.edl"; 6]
            .into_iter()
            .chain(["small.edl"; 4])
            .chain(["large.edl"]);
        let devices = ('a'..='k').zip(screens).map(|(name, screen)| {
            Child::Device(Arc::new(
                Device::new(name.to_string())
                    .with_prefix(format!("MMS:{name}"))
                    .with_embedded_screen(screen)
                    .with_macros(format!("P=MMS:{name}")),
            ))
        });
        Group::new("Device Group", devices).unwrap()
    }

    pub fn stand_group() -> Group {
        let group = device_group();
        let copies = ["Device One", "Device Two", "Device Three"]
            .map(|name| Child::Group(group.renamed(name).unwrap()));
        Group::new("Stand Group", copies).unwrap()
    }

    pub fn hutch_group() -> Group {
        let stand = stand_group();
        let stands = ["DIA", "DG1", "DG2", "SC1", "DG3", "SC2", "SC3", "DG4"]
            .map(|name| Child::Group(stand.renamed(name).unwrap()));
        Group::hutch("TST", stands).unwrap()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn relative_screens_resolve_against_static_dir() {
        let settings = ScreenSettings::default().with_static_dir("/reg/g/pcds/screens");
        assert_eq!(
            settings.resolve_screen(Path::new("pim.edl")),
            PathBuf::from("/reg/g/pcds/screens/pim.edl")
        );
        assert_eq!(
            settings.resolve_screen(Path::new("/abs/pim.edl")),
            PathBuf::from("/abs/pim.edl")
        );
        assert_eq!(
            ScreenSettings::default().resolve_screen(Path::new("pim.edl")),
            PathBuf::from("pim.edl")
        );
    }

    #[test]
    fn screen_for_picks_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_device_screens(dir.path());
        let settings = ScreenSettings::default().with_static_dir(dir.path());

        let home = screen_for(&fixtures::hutch_group(), &settings).unwrap();
        assert!(home.panel().is_some());
        assert_eq!(home.size(), (600, 900));

        let stand = screen_for(&fixtures::stand_group(), &settings).unwrap();
        assert!(stand.panel().is_none());
        assert_eq!(stand.size(), (600, 1100));
    }
}
