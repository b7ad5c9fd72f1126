//! Packing results.

use spritepack_spec::{PixelRect, SpriteDescriptor};

/// One sprite placed in the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Left edge in atlas pixels.
    pub x: u32,
    /// Top edge in atlas pixels.
    pub y: u32,
    /// Position of the sprite in the input slice passed to [`crate::pack`].
    pub index: usize,
    /// The descriptor that was placed.
    pub sprite: SpriteDescriptor,
}

impl Placement {
    /// Rectangle covered by the sprite.
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.sprite.width, self.sprite.height)
    }
}

/// A vertical strip opened by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub x: u32,
    pub width: u32,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackStats {
    /// Columns opened by the outer driver.
    pub columns: usize,
    /// Calls into region filling, columns included.
    pub regions_filled: usize,
    /// Sub-regions recursed into beside a narrower sprite.
    pub notch_fills: usize,
}

/// Final atlas size and placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Atlas width: the sum of all column widths.
    pub width: u32,
    /// Atlas height, fixed before the first column was opened.
    pub height: u32,
    /// Padding the height estimate was computed with.
    pub padding: u32,
    /// Placements in the order they were made.
    pub placements: Vec<Placement>,
    /// Columns from left to right.
    pub columns: Vec<Column>,
    pub stats: PackStats,
}

impl AtlasLayout {
    /// Total pixels covered by sprites.
    pub fn occupied_area(&self) -> u64 {
        self.placements.iter().map(|p| p.sprite.area()).sum()
    }

    /// Fraction of the atlas covered by sprites.
    pub fn fill_ratio(&self) -> f64 {
        let total = self.width as u64 * self.height as u64;
        if total == 0 {
            return 0.0;
        }
        self.occupied_area() as f64 / total as f64
    }
}
