// ── Colors, fonts, alignment ──

use std::fmt;

/// Entries of the standard EDM `colors.list` palette, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Grey,
    Black,
    Green,
    Yellow,
    Red,
}

impl Color {
    pub fn index(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Grey => 4,
            Self::Black => 14,
            Self::Green => 15,
            Self::Red => 20,
            Self::Yellow => 24,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {}", self.index())
    }
}

/// Cross-axis placement inside a layout; also text justification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Offset of an item of `size` inside `available`.
    pub fn offset(self, available: i32, size: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (available - size) / 2,
            Self::End => available - size,
        }
    }

    pub(crate) fn edm_name(self) -> &'static str {
        match self {
            Self::Start => "left",
            Self::Center => "center",
            Self::End => "right",
        }
    }
}

/// X11 font as EDM names it, e.g. `helvetica-bold-r-12.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    pub size: f32,
}

impl Font {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "helvetica".into(),
            bold: false,
            italic: false,
            size: 12.0,
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weight = if self.bold { "bold" } else { "medium" };
        let slant = if self.italic { "i" } else { "r" };
        write!(f, "{}-{weight}-{slant}-{:.1}", self.family, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_names() {
        assert_eq!(Font::default().to_string(), "helvetica-medium-r-12.0");
        assert_eq!(Font::bold().with_size(18.0).to_string(), "helvetica-bold-r-18.0");
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Alignment::Start.offset(50, 10), 0);
        assert_eq!(Alignment::Center.offset(50, 10), 20);
        assert_eq!(Alignment::End.offset(50, 10), 40);
    }

    #[test]
    fn colors_render_as_palette_indices() {
        assert_eq!(Color::Black.to_string(), "index 14");
    }
}
