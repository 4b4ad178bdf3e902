// ── .edl writer ──
//
// EDM 4.0.1 text format: a screen properties block followed by one
// `object <class>` block per widget, drawn in file order.

use std::fmt::{self, Write as _};
use std::path::Path;

use crate::error::EdmError;
use crate::layout::Layout;
use crate::style::{Alignment, Color, Font};
use crate::widget::{EmbeddedWindow, Widget, WidgetKind};

/// A complete screen: window size plus positioned widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub w: i32,
    pub h: i32,
    pub widgets: Vec<Widget>,
}

impl Screen {
    /// Window sized to fit `layout` placed at the origin.
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            w: layout.width(),
            h: layout.height(),
            widgets: layout.place(0, 0),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "4 0 1")?;
        writeln!(f, "beginScreenProperties")?;
        writeln!(f, "major 4\nminor 0\nrelease 1")?;
        writeln!(f, "x 0\ny 0\nw {}\nh {}", self.w, self.h)?;
        writeln!(f, "font \"{}\"", Font::default().with_size(18.0))?;
        writeln!(f, "ctlFont \"{}\"", Font::bold().with_size(10.0))?;
        writeln!(f, "btnFont \"{}\"", Font::default().with_size(18.0))?;
        writeln!(f, "fgColor {}", Color::Black)?;
        writeln!(f, "bgColor {}", Color::Grey)?;
        writeln!(f, "textColor {}", Color::Black)?;
        writeln!(f, "ctlFgColor1 {}", Color::Black)?;
        writeln!(f, "ctlFgColor2 {}", Color::White)?;
        writeln!(f, "ctlBgColor1 {}", Color::White)?;
        writeln!(f, "ctlBgColor2 {}", Color::Black)?;
        writeln!(f, "topShadowColor {}", Color::White)?;
        writeln!(f, "botShadowColor {}", Color::Black)?;
        writeln!(f, "endScreenProperties")?;

        for widget in &self.widgets {
            writeln!(f)?;
            write_object(f, widget)?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn class_of(kind: &WidgetKind) -> (&'static str, &'static str, (u8, u8, u8)) {
    match kind {
        WidgetKind::Text(_) => ("Static Text", "activeXTextClass", (4, 1, 1)),
        WidgetKind::Rectangle(_) => ("Rectangle", "activeRectangleClass", (4, 0, 0)),
        WidgetKind::Circle(_) => ("Circle", "activeCircleClass", (4, 0, 0)),
        WidgetKind::MenuButton(_) => ("Menu Button", "activeMenuButtonClass", (4, 0, 0)),
        WidgetKind::MessageButton(_) => ("Message Button", "activeMessageButtonClass", (4, 0, 0)),
        WidgetKind::Embedded(_) => ("Embedded Window", "activePipClass", (4, 1, 0)),
    }
}

fn write_object(f: &mut fmt::Formatter<'_>, widget: &Widget) -> fmt::Result {
    let (label, class, (major, minor, release)) = class_of(&widget.kind);
    let g = widget.geometry;
    writeln!(f, "# ({label})")?;
    writeln!(f, "object {class}")?;
    writeln!(f, "beginObjectProperties")?;
    writeln!(f, "major {major}\nminor {minor}\nrelease {release}")?;
    writeln!(f, "x {}\ny {}\nw {}\nh {}", g.x, g.y, g.w, g.h)?;

    match &widget.kind {
        WidgetKind::Text(t) => {
            writeln!(f, "font {}", quote(&t.font.to_string()))?;
            if t.alignment != Alignment::Start {
                writeln!(f, "fontAlign {}", quote(t.alignment.edm_name()))?;
            }
            writeln!(f, "fgColor {}", t.font_color)?;
            match t.fill {
                Some(fill) => writeln!(f, "bgColor {fill}")?,
                None => writeln!(f, "bgColor {}\nuseDisplayBg", Color::Grey)?,
            }
            writeln!(f, "value {{\n  {}\n}}", quote(&t.text))?;
            writeln!(f, "lineWidth {}", t.line_width)?;
            if t.line_width > 1 {
                writeln!(f, "border")?;
            }
        }
        WidgetKind::Rectangle(r) => {
            writeln!(f, "lineColor {}", r.line_color)?;
            if let Some(fill) = r.fill {
                writeln!(f, "fill\nfillColor {fill}")?;
            }
            writeln!(f, "lineWidth {}", r.line_width)?;
        }
        WidgetKind::Circle(c) => {
            writeln!(f, "lineColor {}", c.line_color)?;
            writeln!(f, "fill\nfillColor {}", c.fill)?;
            if let Some(pv) = &c.alarm_pv {
                writeln!(f, "fillAlarm\nalarmPv {}", quote(pv))?;
            }
        }
        WidgetKind::MenuButton(m) => {
            writeln!(f, "fgColor {}", m.fg_color)?;
            writeln!(f, "bgColor {}", m.bg_color)?;
            writeln!(f, "inconsistentColor {}", m.bg_color)?;
            writeln!(f, "topShadowColor {}", m.bg_color)?;
            writeln!(f, "botShadowColor {}", m.bg_color)?;
            writeln!(f, "controlPv {}", quote(&m.control_pv))?;
            writeln!(f, "font {}", quote(&Font::default().to_string()))?;
        }
        WidgetKind::MessageButton(m) => {
            writeln!(f, "fgColor {}", Color::Black)?;
            writeln!(f, "onColor {}\noffColor {}", Color::Grey, Color::Grey)?;
            writeln!(f, "topShadowColor {}\nbotShadowColor {}", Color::White, Color::Black)?;
            writeln!(f, "controlPv {}", quote(&m.control_pv))?;
            writeln!(f, "pressValue {}", quote(&m.press_value))?;
            writeln!(f, "onLabel \"\"\noffLabel \"\"")?;
            if m.invisible {
                writeln!(f, "invisible")?;
            }
            writeln!(f, "font {}", quote(&Font::default().to_string()))?;
        }
        WidgetKind::Embedded(e) => write_pip(f, e)?,
    }

    if let Some(vis) = &widget.visibility {
        writeln!(f, "visPv {}", quote(&vis.pv))?;
        writeln!(f, "visMin {}", quote(&vis.min.to_string()))?;
        writeln!(f, "visMax {}", quote(&vis.max.to_string()))?;
    }
    writeln!(f, "endObjectProperties")
}

fn write_pip(f: &mut fmt::Formatter<'_>, e: &EmbeddedWindow) -> fmt::Result {
    writeln!(f, "fgColor {}\nbgColor {}", Color::Black, Color::Grey)?;
    writeln!(f, "topShadowColor {}\nbotShadowColor {}", Color::White, Color::Black)?;
    writeln!(f, "displaySource \"menu\"")?;
    if let Some(pv) = &e.control_pv {
        writeln!(f, "filePv {}", quote(pv))?;
    }
    writeln!(f, "sizeOfs 5")?;
    writeln!(f, "numDsps {}", e.displays.len())?;

    let mut files = String::new();
    let mut labels = String::new();
    let mut symbols = String::new();
    for (i, d) in e.displays.iter().enumerate() {
        let file = d
            .path
            .as_deref()
            .map_or_else(|| d.name.clone(), |p| p.display().to_string());
        let _ = writeln!(files, "  {i} {}", quote(&file));
        let _ = writeln!(labels, "  {i} {}", quote(&d.name));
        if let Some(macros) = &d.macros {
            let _ = writeln!(symbols, "  {i} {}", quote(macros));
        }
    }
    writeln!(f, "displayFileName {{\n{files}}}")?;
    writeln!(f, "menuLabel {{\n{labels}}}")?;
    if !symbols.is_empty() {
        writeln!(f, "symbols {{\n{symbols}}}")?;
    }
    if !e.autoscale {
        writeln!(f, "noScroll")?;
    }
    Ok(())
}

// ── Reading ─────────────────────────────────────────────────────────

/// Window size recorded in an existing `.edl` screen header.
pub fn read_screen_size(path: &Path) -> Result<(i32, i32), EdmError> {
    let text = std::fs::read_to_string(path).map_err(|source| EdmError::ScreenRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_screen_size(&text).ok_or_else(|| EdmError::ScreenSize {
        path: path.to_path_buf(),
    })
}

fn parse_screen_size(text: &str) -> Option<(i32, i32)> {
    let (mut w, mut h) = (None, None);
    let header = text
        .lines()
        .skip_while(|l| l.trim() != "beginScreenProperties")
        .take_while(|l| l.trim() != "endScreenProperties");
    for line in header {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("w"), Some(v)) => w = v.parse().ok(),
            (Some("h"), Some(v)) => h = v.parse().ok(),
            _ => {}
        }
    }
    Some((w?, h?))
}
