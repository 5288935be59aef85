//! Cell records and border styling.

use serde::{Deserialize, Serialize};

/// Default cell width in layout units.
pub const DEFAULT_WIDTH: u32 = 85;

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Border colour. White borders are drawn but invisible on paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderColor {
    Black,
    #[default]
    White,
}

impl BorderColor {
    /// The other colour.
    pub fn toggled(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Which horizontal edge of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderSide {
    Top,
    Bottom,
}

/// One horizontal cell border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    pub color: BorderColor,
    /// Line thickness, 1 or 2.
    pub thickness: u8,
}

impl Border {
    /// Thin black rule.
    pub const BLACK: Self = Self {
        color: BorderColor::Black,
        thickness: 1,
    };

    /// Thin white (invisible) rule.
    pub const WHITE: Self = Self {
        color: BorderColor::White,
        thickness: 1,
    };

    /// Black when `ruled`, white otherwise.
    pub fn ruled(ruled: bool) -> Self {
        if ruled {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    pub align: Align,
    pub editable: bool,
    /// Hidden cells are covered by the span of the visible cell to their left.
    pub visible: bool,
    pub width: u32,
    pub border_top: Border,
    pub border_bottom: Border,
}

impl Cell {
    /// Centred, editable, visible cell of default width with white borders.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            align: Align::Center,
            editable: true,
            visible: true,
            width: DEFAULT_WIDTH,
            border_top: Border::WHITE,
            border_bottom: Border::WHITE,
        }
    }

    /// Placeholder covered by a merged neighbour.
    pub fn hidden() -> Self {
        Self {
            editable: false,
            visible: false,
            ..Self::new("")
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_top(mut self, border: Border) -> Self {
        self.border_top = border;
        self
    }

    pub fn with_bottom(mut self, border: Border) -> Self {
        self.border_bottom = border;
        self
    }

    /// Border on `side`.
    pub fn border(&self, side: BorderSide) -> Border {
        match side {
            BorderSide::Top => self.border_top,
            BorderSide::Bottom => self.border_bottom,
        }
    }

    pub(crate) fn border_mut(&mut self, side: BorderSide) -> &mut Border {
        match side {
            BorderSide::Top => &mut self.border_top,
            BorderSide::Bottom => &mut self.border_bottom,
        }
    }
}
