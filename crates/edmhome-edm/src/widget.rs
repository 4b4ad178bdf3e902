// ── EDM drawing primitives ──
//
// The handful of EDM object classes the screens are built from. A widget
// is its geometry, an optional visibility rule, and the class-specific
// properties in `WidgetKind`.

use std::path::PathBuf;

use crate::style::{Alignment, Color, Font};

/// Position and size in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Geometry {
    pub fn sized(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }
}

/// Show the widget only while `min <= pv < max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
    pub pv: String,
    pub min: f64,
    pub max: f64,
}

impl Visibility {
    pub fn new(pv: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            pv: pv.into(),
            min,
            max,
        }
    }
}

/// One screen an embedded window can show.
///
/// `path` stays empty until the screen it names has been written.
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    pub name: String,
    pub path: Option<PathBuf>,
    pub macros: Option<String>,
}

impl Display {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            macros: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_macros(mut self, macros: Option<String>) -> Self {
        self.macros = macros;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticText {
    pub text: String,
    pub font: Font,
    pub font_color: Color,
    pub fill: Option<Color>,
    pub line_width: i32,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub line_color: Color,
    pub fill: Option<Color>,
    pub line_width: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub line_color: Color,
    pub fill: Color,
    /// PV whose alarm severity recolors the fill.
    pub alarm_pv: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuButton {
    pub control_pv: String,
    pub fg_color: Color,
    pub bg_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageButton {
    pub control_pv: String,
    pub press_value: String,
    pub invisible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedWindow {
    /// Enum PV picking the visible display; the first display otherwise.
    pub control_pv: Option<String>,
    pub displays: Vec<Display>,
    pub autoscale: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Text(StaticText),
    Rectangle(Rectangle),
    Circle(Circle),
    MenuButton(MenuButton),
    MessageButton(MessageButton),
    Embedded(EmbeddedWindow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub geometry: Geometry,
    pub visibility: Option<Visibility>,
    pub kind: WidgetKind,
}

impl Widget {
    pub fn new(geometry: Geometry, kind: WidgetKind) -> Self {
        Self {
            geometry,
            visibility: None,
            kind,
        }
    }

    pub fn text(text: impl Into<String>, w: i32, h: i32) -> Self {
        Self::new(
            Geometry::sized(w, h),
            WidgetKind::Text(StaticText {
                text: text.into(),
                font: Font::default(),
                font_color: Color::Black,
                fill: None,
                line_width: 1,
                alignment: Alignment::Center,
            }),
        )
    }

    /// Unfilled outline.
    pub fn rectangle(w: i32, h: i32, line_color: Color) -> Self {
        Self::new(
            Geometry::sized(w, h),
            WidgetKind::Rectangle(Rectangle {
                line_color,
                fill: None,
                line_width: 1,
            }),
        )
    }

    pub fn circle(diameter: i32, fill: Color) -> Self {
        Self::new(
            Geometry::sized(diameter, diameter),
            WidgetKind::Circle(Circle {
                line_color: Color::Black,
                fill,
                alarm_pv: None,
            }),
        )
    }

    pub fn menu_button(control_pv: impl Into<String>, blend: Color, w: i32, h: i32) -> Self {
        Self::new(
            Geometry::sized(w, h),
            WidgetKind::MenuButton(MenuButton {
                control_pv: control_pv.into(),
                fg_color: blend,
                bg_color: blend,
            }),
        )
    }

    /// Invisible button writing `press_value` to `control_pv`.
    pub fn message_button(
        control_pv: impl Into<String>,
        press_value: impl Into<String>,
        w: i32,
        h: i32,
    ) -> Self {
        Self::new(
            Geometry::sized(w, h),
            WidgetKind::MessageButton(MessageButton {
                control_pv: control_pv.into(),
                press_value: press_value.into(),
                invisible: true,
            }),
        )
    }

    pub fn embedded(control_pv: Option<String>, displays: Vec<Display>, w: i32, h: i32) -> Self {
        Self::new(
            Geometry::sized(w, h),
            WidgetKind::Embedded(EmbeddedWindow {
                control_pv,
                displays,
                autoscale: false,
            }),
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.geometry = self.geometry.at(x, y);
        self
    }

    pub fn width(&self) -> i32 {
        self.geometry.w
    }

    pub fn height(&self) -> i32 {
        self.geometry.h
    }

    pub fn as_text(&self) -> Option<&StaticText> {
        match &self.kind {
            WidgetKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut StaticText> {
        match &mut self.kind {
            WidgetKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_circle_mut(&mut self) -> Option<&mut Circle> {
        match &mut self.kind {
            WidgetKind::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&EmbeddedWindow> {
        match &self.kind {
            WidgetKind::Embedded(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_menu_button(&self) -> bool {
        matches!(self.kind, WidgetKind::MenuButton(_))
    }

    pub fn is_message_button(&self) -> bool {
        matches!(self.kind, WidgetKind::MessageButton(_))
    }
}
