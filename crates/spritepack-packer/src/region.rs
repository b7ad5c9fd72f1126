//! Axis-aligned regions of the atlas.

/// A point in atlas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A rectangular sub-area of the atlas, from `top_left` (inclusive) to
/// `bottom_right` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Region {
    /// Creates a region. `bottom_right` must not lie above or left of `top_left`.
    #[inline]
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        debug_assert!(bottom_right.x >= top_left.x && bottom_right.y >= top_left.y);
        Self {
            top_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom_right.y - self.top_left.y
    }

    /// True when the region has no area and can hold nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
