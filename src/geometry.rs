//! Basic geometry shared by layout, rendering and hit testing.
//!
//! All values are in page coordinates (pixels, origin top-left).

use serde::{Deserialize, Serialize};

/// Width and height of a component or page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The right and bottom edges are exclusive, so two rectangles that share an
    /// edge never both contain a point on it.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if `other` lies completely within this rectangle.
    #[must_use]
    pub fn encloses(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(29.9, 14.9));
        assert!(!r.contains(30.0, 12.0));
        assert!(!r.contains(15.0, 15.0));
        assert!(!r.contains(9.9, 12.0));
    }

    #[test]
    fn encloses_checks_all_edges() {
        let page = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(page.encloses(&Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(page.encloses(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!page.encloses(&Rect::new(95.0, 10.0, 10.0, 5.0)));
        assert!(!page.encloses(&Rect::new(-1.0, 10.0, 10.0, 5.0)));
    }
}
