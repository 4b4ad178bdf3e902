// ── Embedded group displays ──
//
// A header bar followed by one block per device screen type. Each block is
// a grid of embedded device windows, as many columns as fit the target
// width.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use edmhome_core::{Device, Group};
use tracing::debug;

use super::ScreenSettings;
use crate::error::EdmError;
use crate::layout::{Item, Layout};
use crate::style::Color;
use crate::widget::{Display, Widget};
use crate::writer::read_screen_size;

/// Display of a group's devices, ready to be written under `file_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedGroup {
    file_name: String,
    layout: Layout,
}

impl EmbeddedGroup {
    /// Display of one device group, saved as `<alias>.edl`.
    pub fn for_group(
        group: &Group,
        target_width: i32,
        settings: &ScreenSettings,
    ) -> Result<Self, EdmError> {
        build(
            group.name(),
            format!("{}.edl", group.alias()),
            &group.devices(),
            target_width,
            settings,
        )
    }

    /// Display of every device on a stand, saved as `overview.edl`.
    pub fn for_stand(
        stand: &Group,
        target_width: i32,
        settings: &ScreenSettings,
    ) -> Result<Self, EdmError> {
        build(
            &format!("{} Overview", stand.name()),
            "overview.edl".to_owned(),
            &stand.devices(),
            target_width,
            settings,
        )
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    pub fn header(&self) -> Option<&Layout> {
        self.layout.items().first().and_then(Item::as_layout)
    }

    /// Make the header open a menu on `control_pv`.
    pub fn buttonize_header(&mut self, control_pv: &str, blend: Color) {
        if let Some(Item::Layout(header)) = self.layout.items_mut().first_mut() {
            let plain = std::mem::replace(header, Layout::stacked());
            *header = plain.buttonize_menu(control_pv, blend);
        }
    }
}

fn build(
    title: &str,
    file_name: String,
    devices: &[&Arc<Device>],
    target_width: i32,
    settings: &ScreenSettings,
) -> Result<EmbeddedGroup, EdmError> {
    let style = &settings.embedded;
    let content_width = target_width - 2 * style.margin;

    let mut layout = Layout::vertical()
        .with_spacing(style.spacing)
        .with_margin(style.margin);

    let mut header = Widget::text(title, content_width, style.header_height);
    if let Some(text) = header.as_text_mut() {
        text.font_color = Color::White;
        text.fill = Some(style.theme);
        text.line_width = 3;
    }
    layout.push(Layout::stacked().with(header));

    for screen in embedded_types(devices, settings) {
        let (screen_w, screen_h) = read_screen_size(&screen)?;
        let columns = ((content_width + style.device_spacing) / (screen_w + style.device_spacing)).max(1);
        let columns = usize::try_from(columns).unwrap_or(1);

        let of_type: Vec<&Arc<Device>> = devices
            .iter()
            .copied()
            .filter(|d| screen_of(d, settings).as_ref() == Some(&screen))
            .collect();
        debug!(
            screen = %screen.display(),
            devices = of_type.len(),
            columns,
            "embedding device screens"
        );

        let mut grid = Layout::horizontal().with_spacing(style.device_spacing);
        for column in array_split(&of_type, columns) {
            let mut col = Layout::vertical().with_spacing(style.device_spacing);
            for device in column {
                let display = Display::new(device.name.as_str())
                    .with_path(&screen)
                    .with_macros(device.macros.clone());
                col.push(Widget::embedded(None, vec![display], screen_w, screen_h));
            }
            grid.push(col);
        }
        layout.push(grid);
    }

    Ok(EmbeddedGroup { file_name, layout })
}

fn screen_of(device: &Device, settings: &ScreenSettings) -> Option<PathBuf> {
    device
        .embedded_screen
        .as_deref()
        .map(|s| settings.resolve_screen(s))
}

/// Distinct device screens, fewest instances first. Ties keep the order
/// of first appearance. Devices without a screen are skipped.
pub fn embedded_types(devices: &[&Arc<Device>], settings: &ScreenSettings) -> Vec<PathBuf> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut counts: HashMap<PathBuf, usize> = HashMap::new();
    for screen in devices.iter().filter_map(|d| screen_of(d, settings)) {
        let count = counts.entry(screen.clone()).or_insert(0);
        if *count == 0 {
            order.push(screen);
        }
        *count += 1;
    }
    order.sort_by_key(|s| counts.get(s).copied().unwrap_or(0));
    order
}

/// Split into `parts` runs as evenly as possible, longer runs first.
/// Empty runs are dropped.
pub fn array_split<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    let parts = parts.max(1);
    let (base, extra) = (items.len() / parts, items.len() % parts);
    let mut out = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        if len > 0 {
            out.push(&items[start..start + len]);
        }
        start += len;
    }
    out
}
