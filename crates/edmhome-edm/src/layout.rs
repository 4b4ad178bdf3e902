// ── Box layout ──
//
// Nested horizontal / vertical / stacked boxes. Sizes are derived from the
// children on demand; `place` resolves the tree into absolutely positioned
// widgets once the origin is known.

use crate::style::{Alignment, Color};
use crate::widget::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// All children share the origin.
    Stacked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Widget(Widget),
    Layout(Layout),
}

impl Item {
    pub fn width(&self) -> i32 {
        match self {
            Self::Widget(w) => w.width(),
            Self::Layout(l) => l.width(),
        }
    }

    pub fn height(&self) -> i32 {
        match self {
            Self::Widget(w) => w.height(),
            Self::Layout(l) => l.height(),
        }
    }

    pub fn as_widget(&self) -> Option<&Widget> {
        match self {
            Self::Widget(w) => Some(w),
            Self::Layout(_) => None,
        }
    }

    pub fn as_layout(&self) -> Option<&Layout> {
        match self {
            Self::Layout(l) => Some(l),
            Self::Widget(_) => None,
        }
    }
}

impl From<Widget> for Item {
    fn from(widget: Widget) -> Self {
        Self::Widget(widget)
    }
}

impl From<Layout> for Item {
    fn from(layout: Layout) -> Self {
        Self::Layout(layout)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    arrangement: Arrangement,
    spacing: i32,
    margin: i32,
    alignment: Alignment,
    items: Vec<Item>,
}

impl Layout {
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            arrangement,
            spacing: 0,
            margin: 0,
            alignment: Alignment::Start,
            items: Vec::new(),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Arrangement::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Arrangement::Vertical)
    }

    pub fn stacked() -> Self {
        Self::new(Arrangement::Stacked)
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with(mut self, item: impl Into<Item>) -> Self {
        self.push(item);
        self
    }

    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn insert(&mut self, index: usize, item: impl Into<Item>) {
        self.items.insert(index, item.into());
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn gaps(&self) -> i32 {
        let n = i32::try_from(self.items.len()).unwrap_or(i32::MAX);
        self.spacing * (n - 1).max(0)
    }

    pub fn width(&self) -> i32 {
        let widths = self.items.iter().map(Item::width);
        let content = match self.arrangement {
            Arrangement::Horizontal => widths.sum::<i32>() + self.gaps(),
            Arrangement::Vertical | Arrangement::Stacked => widths.max().unwrap_or(0),
        };
        content + 2 * self.margin
    }

    pub fn height(&self) -> i32 {
        let heights = self.items.iter().map(Item::height);
        let content = match self.arrangement {
            Arrangement::Vertical => heights.sum::<i32>() + self.gaps(),
            Arrangement::Horizontal | Arrangement::Stacked => heights.max().unwrap_or(0),
        };
        content + 2 * self.margin
    }

    /// Resolve to absolutely positioned widgets with the layout's top-left
    /// corner at `(x, y)`. Earlier items come first, so later ones draw on
    /// top.
    pub fn place(&self, x: i32, y: i32) -> Vec<Widget> {
        let mut out = Vec::new();
        self.place_into(x, y, &mut out);
        out
    }

    fn place_into(&self, x: i32, y: i32, out: &mut Vec<Widget>) {
        let inner_w = self.width() - 2 * self.margin;
        let inner_h = self.height() - 2 * self.margin;
        let (mut cx, mut cy) = (x + self.margin, y + self.margin);

        for item in &self.items {
            let (iw, ih) = (item.width(), item.height());
            let (ix, iy) = match self.arrangement {
                Arrangement::Horizontal => (cx, cy + self.alignment.offset(inner_h, ih)),
                Arrangement::Vertical => (cx + self.alignment.offset(inner_w, iw), cy),
                Arrangement::Stacked => (
                    cx + self.alignment.offset(inner_w, iw),
                    cy + self.alignment.offset(inner_h, ih),
                ),
            };

            match item {
                Item::Widget(w) => out.push(w.clone().at(ix, iy)),
                Item::Layout(l) => l.place_into(ix, iy, out),
            }

            match self.arrangement {
                Arrangement::Horizontal => cx += iw + self.spacing,
                Arrangement::Vertical => cy += ih + self.spacing,
                Arrangement::Stacked => {}
            }
        }
    }

    // ── Buttonize ───────────────────────────────────────────────────

    /// Cover the whole layout with `button`, sized to fit, as the first
    /// member of a stacked layout. A stacked layout takes the button
    /// directly; anything else is wrapped.
    pub fn buttonize(self, button: Widget) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut button = button;
        button.geometry.w = w;
        button.geometry.h = h;

        let mut stacked = if self.arrangement == Arrangement::Stacked {
            self
        } else {
            Self::stacked().with(self)
        };
        stacked.insert(0, button);
        stacked
    }

    /// [`Layout::buttonize`] with a menu button driving `control_pv`.
    pub fn buttonize_menu(self, control_pv: impl Into<String>, blend: Color) -> Self {
        self.buttonize(Widget::menu_button(control_pv, blend, 0, 0))
    }

    /// [`Layout::buttonize`] with an invisible message button writing
    /// `value` to `control_pv`.
    pub fn buttonize_message(self, control_pv: impl Into<String>, value: impl Into<String>) -> Self {
        self.buttonize(Widget::message_button(control_pv, value, 0, 0))
    }
}
