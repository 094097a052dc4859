//! Rectangles produced by canvas subdivision.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in the normalized 0-100 canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// The whole canvas, `(0, 0, 100, 100)`.
    pub const CANVAS: Self = Self::new(0.0, 0.0, 100.0, 100.0);

    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Splits into left and right parts; `ratio` is the left part's share of the width.
    #[must_use]
    pub fn split_vertical(&self, ratio: f64) -> (Self, Self) {
        let left = self.width * ratio;
        (
            Self::new(self.x, self.y, left, self.height),
            Self::new(self.x + left, self.y, self.width - left, self.height),
        )
    }

    /// Splits into top and bottom parts; `ratio` is the top part's share of the height.
    #[must_use]
    pub fn split_horizontal(&self, ratio: f64) -> (Self, Self) {
        let top = self.height * ratio;
        (
            Self::new(self.x, self.y, self.width, top),
            Self::new(self.x, self.y + top, self.width, self.height - top),
        )
    }
}

/// One leaf of the subdivision, tagged with a palette index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Index into the palette's color list
    pub color_index: usize,
}

impl Tile {
    /// Creates a tile covering `rect`.
    #[must_use]
    pub const fn new(rect: Rect, color_index: usize) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color_index,
        }
    }

    /// The tile's rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Area of the tile.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}
