//! Sprite descriptor value type.

use serde::{Deserialize, Serialize};

/// A sprite to be packed: a name and its logical size in pixels.
///
/// Descriptors are compared by value here, but the packing engine tracks them
/// by their position in the input slice, so two equal descriptors are still
/// placed independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteDescriptor {
    /// Sprite name. May carry an embedded `(x1xy1;x2xy2)` slice pattern.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SpriteDescriptor {
    /// Creates a new sprite descriptor.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Footprint area in pixels, widened to avoid overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_from_json() {
        let json = r#"{ "name": "hero", "width": 32, "height": 48 }"#;
        let sprite: SpriteDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(sprite, SpriteDescriptor::new("hero", 32, 48));
        assert_eq!(sprite.area(), 32 * 48);
    }

    #[test]
    fn test_sprite_rejects_unknown_fields() {
        let json = r#"{ "name": "hero", "width": 32, "height": 48, "rotated": true }"#;
        assert!(serde_json::from_str::<SpriteDescriptor>(json).is_err());
    }
}
