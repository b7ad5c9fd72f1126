//! Atlas lookup table types.
//!
//! The metadata written next to a composed atlas maps each sprite name to its
//! pixel rectangle, its slice rectangle, and normalized UV coordinates.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in atlas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Lookup entry for one packed sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    /// Lookup name, with any slice pattern removed.
    pub name: String,
    /// Content rectangle in atlas pixels (excludes the padding gutter).
    pub frame: PixelRect,
    /// Inner slice rectangle in atlas pixels. Equals `frame` when the sprite
    /// name carries no slice pattern.
    pub slice: PixelRect,
    /// Left edge U coordinate (0-1).
    pub u_min: f64,
    /// Top edge V coordinate (0-1).
    pub v_min: f64,
    /// Right edge U coordinate (0-1).
    pub u_max: f64,
    /// Bottom edge V coordinate (0-1).
    pub v_max: f64,
}

impl SpriteFrame {
    /// Builds a frame entry, deriving UVs from the atlas size.
    pub fn from_pixels(
        name: impl Into<String>,
        frame: PixelRect,
        slice: PixelRect,
        atlas_width: u32,
        atlas_height: u32,
    ) -> Self {
        let aw = atlas_width.max(1) as f64;
        let ah = atlas_height.max(1) as f64;
        Self {
            name: name.into(),
            u_min: frame.x as f64 / aw,
            v_min: frame.y as f64 / ah,
            u_max: frame.right() as f64 / aw,
            v_max: frame.bottom() as f64 / ah,
            frame,
            slice,
        }
    }
}

/// Metadata output for a packed atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasMetadata {
    /// Atlas width in pixels.
    pub atlas_width: u32,
    /// Atlas height in pixels.
    pub atlas_height: u32,
    /// Gutter in pixels added around each sprite.
    pub padding: u32,
    /// BLAKE3 hash of the composed PNG, when one was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// One entry per sprite, in placement order.
    pub sprites: Vec<SpriteFrame>,
}

impl AtlasMetadata {
    /// Finds a sprite entry by lookup name.
    pub fn get(&self, name: &str) -> Option<&SpriteFrame> {
        self.sprites.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pixel_rect_intersects() {
        let a = PixelRect::new(0, 0, 10, 10);
        assert!(a.intersects(&PixelRect::new(5, 5, 10, 10)));
        // Touching edges do not overlap
        assert!(!a.intersects(&PixelRect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&PixelRect::new(0, 10, 5, 5)));
    }

    #[test]
    fn test_frame_uvs() {
        let rect = PixelRect::new(64, 0, 64, 32);
        let frame = SpriteFrame::from_pixels("tile", rect, rect, 256, 128);
        assert!((frame.u_min - 0.25).abs() < 1e-10);
        assert!((frame.u_max - 0.5).abs() < 1e-10);
        assert!((frame.v_min).abs() < 1e-10);
        assert!((frame.v_max - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_metadata_serialization() {
        let rect = PixelRect::new(0, 0, 16, 16);
        let metadata = AtlasMetadata {
            atlas_width: 16,
            atlas_height: 16,
            padding: 0,
            hash: None,
            sprites: vec![SpriteFrame::from_pixels("coin", rect, rect, 16, 16)],
        };

        let json = serde_json::to_string_pretty(&metadata).unwrap();
        assert!(!json.contains("hash"));

        let parsed: AtlasMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
        assert_eq!(parsed.get("coin").map(|s| s.frame), Some(rect));
        assert!(parsed.get("gem").is_none());
    }
}
