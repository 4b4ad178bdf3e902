// ── Stand and home windows ──
//
// A window is an embedded window driven by a group selector, optionally
// beside a panel of controls, plus the sub-displays the embedded window
// switches between. Sub-displays are written first so their paths can be
// recorded in the parent before the parent itself is written.

use std::path::{Path, PathBuf};

use edmhome_core::Group;
use tracing::info;

use super::embedded::EmbeddedGroup;
use super::indicator::{stand_button, stand_indicator};
use super::sink::{BuildDir, DisplaySink, TempDisplays, TemporaryScreen};
use super::ScreenSettings;
use crate::error::EdmError;
use crate::layout::Layout;
use crate::style::Alignment;
use crate::widget::{Display, Widget};
use crate::writer::Screen;

/// Content of one embedded display.
#[derive(Debug, Clone, PartialEq)]
pub enum SubDisplay {
    /// A plain screen.
    Layout(Layout),
    /// A window with sub-displays of its own.
    Window(Window),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    alias: String,
    panel: Option<Layout>,
    control_pv: String,
    size: (i32, i32),
    spacing: i32,
    displays: Vec<Display>,
    subdisplays: Vec<SubDisplay>,
}

impl Window {
    /// Alias of the group shown; prefixes every sub-display file name.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn panel(&self) -> Option<&Layout> {
        self.panel.as_ref()
    }

    /// Size of the embedded window.
    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    /// Displays of the embedded window, in selector order.
    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    pub fn subdisplays(&self) -> &[SubDisplay] {
        &self.subdisplays
    }

    /// The root layout with display paths not yet filled in.
    pub fn layout(&self) -> Layout {
        self.root_layout(self.displays.clone())
    }

    fn root_layout(&self, displays: Vec<Display>) -> Layout {
        let embedded = Widget::embedded(
            Some(self.control_pv.clone()),
            displays,
            self.size.0,
            self.size.1,
        );
        let mut root = Layout::horizontal()
            .with_spacing(self.spacing)
            .with_alignment(Alignment::Center);
        if let Some(panel) = &self.panel {
            root.push(panel.clone());
        }
        root.push(embedded);
        root
    }

    /// Write every sub-display as `<alias><display name>` and return the
    /// displays with their paths filled in.
    fn write_subdisplays(&self, sink: &mut dyn DisplaySink) -> Result<Vec<Display>, EdmError> {
        let mut displays = self.displays.clone();
        for (display, sub) in displays.iter_mut().zip(&self.subdisplays) {
            let screen = match sub {
                SubDisplay::Layout(layout) => Screen::from_layout(layout),
                SubDisplay::Window(window) => {
                    let inner = window.write_subdisplays(sink)?;
                    Screen::from_layout(&window.root_layout(inner))
                }
            };
            let file_name = format!("{}{}", self.alias, display.name);
            display.path = Some(sink.write(&file_name, &screen)?);
        }
        Ok(displays)
    }

    fn write_all(&self, sink: &mut dyn DisplaySink, file_name: &str) -> Result<PathBuf, EdmError> {
        let displays = self.write_subdisplays(sink)?;
        let screen = Screen::from_layout(&self.root_layout(displays));
        sink.write(file_name, &screen)
    }

    /// Root file name: `name`, or the alias, with `.edl` appended if
    /// missing.
    pub fn file_name(&self, name: Option<&str>) -> String {
        let stem = name.unwrap_or(self.alias.as_str());
        if stem.ends_with(".edl") {
            stem.to_owned()
        } else {
            format!("{stem}.edl")
        }
    }

    /// Write the window and all sub-displays into `build_dir`. Returns the
    /// written paths, root last.
    pub fn save(&self, build_dir: &Path, name: Option<&str>) -> Result<Vec<PathBuf>, EdmError> {
        let mut sink = BuildDir::create(build_dir)?;
        let root = self.write_all(&mut sink, &self.file_name(name))?;
        info!(root = %root.display(), "screens saved");
        Ok(sink.into_written())
    }

    /// Write the window and all sub-displays into temp files.
    pub fn render_temporary(&self) -> Result<TemporaryScreen, EdmError> {
        let mut sink = TempDisplays::new();
        let root = self.write_all(&mut sink, &self.file_name(None))?;
        Ok(TemporaryScreen::new(root, sink))
    }
}

/// Stand window: one embedded window switching between a display per
/// subgroup and the stand overview.
pub fn stand_window(stand: &Group, settings: &ScreenSettings) -> Result<Window, EdmError> {
    stand_window_sized(stand, settings.stand_window, settings)
}

fn stand_window_sized(
    stand: &Group,
    size: (i32, i32),
    settings: &ScreenSettings,
) -> Result<Window, EdmError> {
    let selector = stand.selector()?.to_string();
    let theme = settings.embedded.theme;

    let mut embedded = Vec::new();
    for group in stand.subgroups() {
        embedded.push(EmbeddedGroup::for_group(group, size.0, settings)?);
    }
    embedded.push(EmbeddedGroup::for_stand(stand, size.0, settings)?);
    for emb in &mut embedded {
        emb.buttonize_header(&selector, theme);
    }

    let displays = embedded.iter().map(|e| Display::new(e.file_name())).collect();
    let subdisplays = embedded
        .into_iter()
        .map(|e| SubDisplay::Layout(e.into_layout()))
        .collect();

    Ok(Window {
        alias: stand.alias(),
        panel: None,
        control_pv: selector,
        size,
        spacing: settings.horiz_spacing,
        displays,
        subdisplays,
    })
}

/// Home window: a row of stand indicators beside an embedded window that
/// switches between the stand windows.
pub fn home_window(hutch: &Group, settings: &ScreenSettings) -> Result<Window, EdmError> {
    let selector = hutch.selector()?.to_string();

    let mut indicators = Layout::horizontal()
        .with_spacing(settings.horiz_spacing)
        .with_alignment(Alignment::Center);
    let mut stands = Vec::new();

    for stand in hutch.subgroups() {
        let alias = stand.alias();
        let column = Layout::vertical()
            .with_spacing(settings.vert_spacing)
            .with_alignment(Alignment::Center)
            .with(stand_indicator(stand, &settings.indicator)?.buttonize_message(&selector, &alias))
            .with(stand_button(stand).buttonize_message(&selector, &alias));
        indicators.push(column);
        // Stand windows share the home window's embedded size.
        stands.push(stand_window_sized(stand, settings.home_window, settings)?);
    }

    let panel = Layout::vertical()
        .with_spacing(settings.vert_spacing)
        .with_alignment(Alignment::Center)
        .with(indicators);

    let displays = stands
        .iter()
        .map(|s| Display::new(format!("{}.edl", s.alias())))
        .collect();

    info!(hutch = hutch.name(), stands = stands.len(), "home window built");
    Ok(Window {
        alias: hutch.alias(),
        panel: Some(panel),
        control_pv: selector,
        size: settings.home_window,
        spacing: settings.horiz_spacing,
        displays,
        subdisplays: stands.into_iter().map(SubDisplay::Window).collect(),
    })
}
