//! Atlas composition and metadata export.
//!
//! This module connects the packing engine to its collaborators: each sprite
//! image is padded with a replicated-edge gutter, the padded sizes are packed,
//! the padded images are blitted into one texture, and a lookup table is built
//! from the placements. The table's frames point at the sprite content inside
//! the gutter.

use std::collections::HashSet;

use spritepack_spec::{
    parse_slice, strip_slice, AtlasMetadata, PackManifest, PixelRect, SliceError,
    SpriteDescriptor, SpriteFrame,
};
use thiserror::Error;

use crate::engine::{pack, PackError};
use crate::image::{padded_extent, RgbaImage};
use crate::layout::AtlasLayout;
use crate::png::{write_rgba_to_vec_with_hash, PngConfig, PngError};

/// Errors that can occur while building an atlas.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Packing failed.
    #[error("Packing failed: {0}")]
    Pack(#[from] PackError),

    /// A sprite name carries a malformed slice pattern.
    #[error("Invalid slice: {0}")]
    Slice(#[from] SliceError),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    Png(#[from] PngError),

    /// Two sprites map to the same lookup name.
    #[error("Duplicate sprite name: '{0}'")]
    DuplicateName(String),

    /// The packed atlas is too large to compose as a texture.
    #[error("Atlas {width}x{height} exceeds the {max}px texture limit")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
}

/// Largest atlas side `build_atlas` will compose.
pub const MAX_TEXTURE_DIMENSION: u32 = 16384;

/// A sprite image waiting to be packed.
#[derive(Debug, Clone)]
pub struct SpriteSource {
    /// Sprite name, optionally carrying a slice pattern.
    pub name: String,
    /// Unpadded pixel content.
    pub image: RgbaImage,
}

impl SpriteSource {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

/// Result of atlas generation.
#[derive(Debug)]
pub struct AtlasOutput {
    /// Placements of the padded sprites.
    pub layout: AtlasLayout,
    /// Composed atlas texture.
    pub image: RgbaImage,
    /// PNG-encoded atlas image data.
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of the PNG data.
    pub hash: String,
    /// Lookup table for each sprite.
    pub metadata: AtlasMetadata,
}

/// Returns `sprite` enlarged by `padding` on every side.
pub fn padded_descriptor(
    sprite: &SpriteDescriptor,
    padding: u32,
) -> Result<SpriteDescriptor, PackError> {
    let width = padded_extent(sprite.width, padding).ok_or(PackError::AtlasTooLarge)?;
    let height = padded_extent(sprite.height, padding).ok_or(PackError::AtlasTooLarge)?;
    Ok(SpriteDescriptor::new(sprite.name.clone(), width, height))
}

/// Packs, composes, and encodes an atlas from sprite images.
///
/// The layout is computed before any pixels are padded, so an oversized atlas
/// fails with [`AtlasError::TextureTooLarge`] without allocating it.
pub fn build_atlas(sources: &[SpriteSource], padding: u32) -> Result<AtlasOutput, AtlasError> {
    check_unique_names(sources.iter().map(|s| s.name.as_str()))?;

    let descriptors = sources
        .iter()
        .map(|s| {
            let sprite = SpriteDescriptor::new(s.name.clone(), s.image.width, s.image.height);
            padded_descriptor(&sprite, padding)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let layout = pack(&descriptors, padding)?;
    if layout.width > MAX_TEXTURE_DIMENSION || layout.height > MAX_TEXTURE_DIMENSION {
        return Err(AtlasError::TextureTooLarge {
            width: layout.width,
            height: layout.height,
            max: MAX_TEXTURE_DIMENSION,
        });
    }

    let padded = sources
        .iter()
        .map(|s| s.image.with_padding(padding).ok_or(PackError::AtlasTooLarge))
        .collect::<Result<Vec<_>, _>>()?;
    let image = compose_atlas(&layout, &padded);

    let config = PngConfig::default();
    let (png_data, hash) = write_rgba_to_vec_with_hash(&image, &config)?;

    let mut metadata = build_metadata(&layout, padding)?;
    metadata.hash = Some(hash.clone());

    Ok(AtlasOutput {
        layout,
        image,
        png_data,
        hash,
        metadata,
    })
}

/// Packs a manifest without pixel data, returning the layout and lookup table.
pub fn plan_manifest(manifest: &PackManifest) -> Result<(AtlasLayout, AtlasMetadata), AtlasError> {
    check_unique_names(manifest.sprites.iter().map(|s| s.name.as_str()))?;

    let descriptors = manifest
        .sprites
        .iter()
        .map(|s| padded_descriptor(s, manifest.padding))
        .collect::<Result<Vec<_>, _>>()?;

    let layout = pack(&descriptors, manifest.padding)?;
    let metadata = build_metadata(&layout, manifest.padding)?;
    Ok((layout, metadata))
}

/// Blits each image at its placement into a transparent atlas.
///
/// `images` is indexed like the descriptors the layout was packed from.
pub fn compose_atlas(layout: &AtlasLayout, images: &[RgbaImage]) -> RgbaImage {
    let mut atlas = RgbaImage::transparent(layout.width, layout.height);
    for placement in &layout.placements {
        if let Some(image) = images.get(placement.index) {
            atlas.blit(image, placement.x, placement.y);
        }
    }
    atlas
}

/// Builds the lookup table for a layout of padded sprites.
///
/// Each frame is the placed rectangle shrunk by `padding` on every side.
pub fn build_metadata(layout: &AtlasLayout, padding: u32) -> Result<AtlasMetadata, SliceError> {
    let mut sprites = Vec::with_capacity(layout.placements.len());

    for placement in &layout.placements {
        let rect = placement.rect();
        let frame = PixelRect::new(
            rect.x + padding,
            rect.y + padding,
            rect.width.saturating_sub(2 * padding),
            rect.height.saturating_sub(2 * padding),
        );
        let slice = match parse_slice(&placement.sprite.name)? {
            Some(spec) => spec.resolve(&frame),
            None => frame,
        };

        sprites.push(SpriteFrame::from_pixels(
            strip_slice(&placement.sprite.name),
            frame,
            slice,
            layout.width,
            layout.height,
        ));
    }

    Ok(AtlasMetadata {
        atlas_width: layout.width,
        atlas_height: layout.height,
        padding,
        hash: None,
        sprites,
    })
}

fn check_unique_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), AtlasError> {
    let mut seen = HashSet::new();
    for name in names {
        let key = strip_slice(name);
        if !seen.insert(key.clone()) {
            return Err(AtlasError::DuplicateName(key));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];

    #[test]
    fn test_build_atlas_single_sprite() {
        let sources = vec![SpriteSource::new("coin", RgbaImage::new(4, 4, RED))];
        let output = build_atlas(&sources, 0).unwrap();

        assert_eq!(output.layout.width, 4);
        assert_eq!(output.layout.height, 4);
        assert_eq!(output.image.get(3, 3), RED);
        assert_eq!(output.metadata.hash.as_deref(), Some(output.hash.as_str()));

        let coin = output.metadata.get("coin").unwrap();
        assert_eq!(coin.frame, PixelRect::new(0, 0, 4, 4));
        assert_eq!(coin.slice, coin.frame);
    }

    #[test]
    fn test_build_atlas_with_padding() {
        let sources = vec![
            SpriteSource::new("a", RgbaImage::new(4, 4, RED)),
            SpriteSource::new("b", RgbaImage::new(4, 4, GREEN)),
        ];
        let output = build_atlas(&sources, 1).unwrap();

        // Padded sprites are 6x6; estimate adds padding again: 2 * 8 * 8 = 128 -> 12
        assert_eq!(output.layout.height, 12);
        assert_eq!(output.layout.width, 6);

        let a = output.metadata.get("a").unwrap();
        let b = output.metadata.get("b").unwrap();
        assert_eq!(a.frame, PixelRect::new(1, 1, 4, 4));
        assert_eq!(b.frame, PixelRect::new(1, 7, 4, 4));

        // Gutter replicates edge color
        assert_eq!(output.image.get(0, 0), RED);
        assert_eq!(output.image.get(0, 6), GREEN);
    }

    #[test]
    fn test_slice_metadata() {
        let sources = vec![SpriteSource::new(
            "panel(2x2;6x6)",
            RgbaImage::new(8, 8, RED),
        )];
        let output = build_atlas(&sources, 0).unwrap();

        let panel = output.metadata.get("panel").unwrap();
        assert_eq!(panel.frame, PixelRect::new(0, 0, 8, 8));
        assert_eq!(panel.slice, PixelRect::new(2, 2, 4, 4));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let sources = vec![
            SpriteSource::new("icon", RgbaImage::new(2, 2, RED)),
            SpriteSource::new("icon(0x0;1x1)", RgbaImage::new(2, 2, RED)),
        ];
        let err = build_atlas(&sources, 0).unwrap_err();
        assert!(matches!(err, AtlasError::DuplicateName(name) if name == "icon"));
    }

    #[test]
    fn test_empty_sources_rejected() {
        let err = build_atlas(&[], 0).unwrap_err();
        assert!(matches!(err, AtlasError::Pack(PackError::EmptyInput)));
    }

    #[test]
    fn test_plan_manifest_matches_build() {
        let manifest = PackManifest {
            padding: 1,
            sprites: vec![
                SpriteDescriptor::new("a", 4, 4),
                SpriteDescriptor::new("b", 4, 4),
            ],
        };
        let (layout, metadata) = plan_manifest(&manifest).unwrap();

        let sources = vec![
            SpriteSource::new("a", RgbaImage::new(4, 4, RED)),
            SpriteSource::new("b", RgbaImage::new(4, 4, GREEN)),
        ];
        let output = build_atlas(&sources, 1).unwrap();

        assert_eq!(layout, output.layout);
        assert_eq!(metadata.sprites, output.metadata.sprites);
    }

    #[test]
    fn test_plan_manifest_padding_overflow() {
        let manifest = PackManifest {
            padding: 1 << 31,
            sprites: vec![SpriteDescriptor::new("a", 4, 4)],
        };
        assert!(manifest.validate().is_ok());

        let err = plan_manifest(&manifest).unwrap_err();
        assert!(matches!(err, AtlasError::Pack(PackError::AtlasTooLarge)));
    }

    #[test]
    fn test_padded_descriptor_overflow() {
        let sprite = SpriteDescriptor::new("wide", u32::MAX - 1, 4);
        assert_eq!(padded_descriptor(&sprite, 1), Err(PackError::AtlasTooLarge));
        assert_eq!(
            padded_descriptor(&sprite, 0),
            Ok(SpriteDescriptor::new("wide", u32::MAX - 1, 4))
        );
    }

    #[test]
    fn test_build_atlas_padding_overflow() {
        let sources = vec![SpriteSource::new("a", RgbaImage::new(4, 4, RED))];
        let err = build_atlas(&sources, 1 << 31).unwrap_err();
        assert!(matches!(err, AtlasError::Pack(PackError::AtlasTooLarge)));
    }

    #[test]
    fn test_build_atlas_rejects_oversized_texture() {
        let sources = vec![SpriteSource::new("a", RgbaImage::new(4, 4, RED))];
        let err = build_atlas(&sources, MAX_TEXTURE_DIMENSION).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::TextureTooLarge { max: MAX_TEXTURE_DIMENSION, .. }
        ));
    }

    #[test]
    fn test_atlas_deterministic() {
        let sources: Vec<SpriteSource> = (0..6)
            .map(|i| SpriteSource::new(format!("s{}", i), RgbaImage::new(2 + i, 3 + i % 2, RED)))
            .collect();

        let first = build_atlas(&sources, 1).unwrap();
        let second = build_atlas(&sources, 1).unwrap();
        assert_eq!(first.png_data, second.png_data);
        assert_eq!(first.hash, second.hash);
    }
}
