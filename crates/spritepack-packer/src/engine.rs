//! Column packing with notch filling.
//!
//! The atlas height is fixed up front from the total sprite area, so the atlas
//! comes out roughly square. Sprites are then taken widest first. Each pass opens
//! a column as wide as the widest unplaced sprite and stacks sprites down it.
//! Whenever a sprite is narrower than the region it lands in, the strip to its
//! right (as tall as the sprite) is filled recursively with the same candidate
//! list. Placements are never revisited.
//!
//! The run is deterministic: the sort is stable, and every pass walks the
//! candidates in the same order.

use spritepack_spec::SpriteDescriptor;
use thiserror::Error;

use crate::layout::{AtlasLayout, Column, PackStats, Placement};
use crate::region::{Point, Region};

/// Errors that can occur during packing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// Nothing to pack.
    #[error("No sprites to pack")]
    EmptyInput,

    /// Sprite has a zero dimension.
    #[error("Sprite '{name}' (index {index}) has invalid size {width}x{height}")]
    InvalidSprite {
        index: usize,
        name: String,
        width: u32,
        height: u32,
    },

    /// Sprite is taller than the estimated atlas height, so no column can hold it.
    #[error("Sprite '{name}' ({width}x{height}) does not fit the atlas height {atlas_height}")]
    SpriteDoesNotFit {
        index: usize,
        name: String,
        width: u32,
        height: u32,
        atlas_height: u32,
    },

    /// Atlas dimensions overflow 32-bit pixel coordinates.
    #[error("Atlas dimensions exceed the 32-bit pixel range")]
    AtlasTooLarge,
}

/// Packs `sprites` into a single atlas.
///
/// `padding` only enters the height estimate (see [`estimate_atlas_height`]).
/// Placement uses each descriptor's own width and height, so callers that want
/// gutters between sprites pass descriptors already enlarged by the gutter.
pub fn pack(sprites: &[SpriteDescriptor], padding: u32) -> Result<AtlasLayout, PackError> {
    validate_sprites(sprites)?;

    let atlas_height = estimate_atlas_height(sprites, padding)?;

    if let Some((index, sprite)) = sprites
        .iter()
        .enumerate()
        .find(|(_, s)| s.height > atlas_height)
    {
        return Err(does_not_fit(index, sprite, atlas_height));
    }

    let mut run = PackRun::new(sprites, atlas_height);
    run.run()?;

    Ok(AtlasLayout {
        width: run.atlas_width,
        height: atlas_height,
        padding,
        placements: run.placements,
        columns: run.columns,
        stats: run.stats,
    })
}

/// Estimates the atlas height as the ceiling square root of the total padded area.
///
/// Each sprite contributes `(width + 2 * padding) * (height + 2 * padding)`.
pub fn estimate_atlas_height(
    sprites: &[SpriteDescriptor],
    padding: u32,
) -> Result<u32, PackError> {
    let pad = 2 * padding as u64;
    let mut total: u128 = 0;
    for sprite in sprites {
        let w = sprite.width as u64 + pad;
        let h = sprite.height as u64 + pad;
        total += w as u128 * h as u128;
    }

    u32::try_from(ceil_sqrt(total)).map_err(|_| PackError::AtlasTooLarge)
}

/// Returns input indices ordered by width, widest first. Ties keep input order.
pub fn width_descending_order(sprites: &[SpriteDescriptor]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sprites.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| sprites[b].width.cmp(&sprites[a].width));
    order
}

fn validate_sprites(sprites: &[SpriteDescriptor]) -> Result<(), PackError> {
    if sprites.is_empty() {
        return Err(PackError::EmptyInput);
    }

    for (index, sprite) in sprites.iter().enumerate() {
        if sprite.width == 0 || sprite.height == 0 {
            return Err(PackError::InvalidSprite {
                index,
                name: sprite.name.clone(),
                width: sprite.width,
                height: sprite.height,
            });
        }
    }

    Ok(())
}

fn does_not_fit(index: usize, sprite: &SpriteDescriptor, atlas_height: u32) -> PackError {
    PackError::SpriteDoesNotFit {
        index,
        name: sprite.name.clone(),
        width: sprite.width,
        height: sprite.height,
        atlas_height,
    }
}

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).sqrt() as u128;
    while r * r > n {
        r -= 1;
    }
    while r * r < n {
        r += 1;
    }
    r
}

/// State of a single packing run.
///
/// Sprites are addressed by their index in the input slice; `placed` is keyed
/// by that index and shared by every level of the fill recursion.
struct PackRun<'a> {
    sprites: &'a [SpriteDescriptor],
    /// Unplaced sprite indices, widest first. Rebuilt after each column.
    remaining: Vec<usize>,
    placed: Vec<bool>,
    placements: Vec<Placement>,
    columns: Vec<Column>,
    stats: PackStats,
    atlas_width: u32,
    atlas_height: u32,
}

impl<'a> PackRun<'a> {
    fn new(sprites: &'a [SpriteDescriptor], atlas_height: u32) -> Self {
        Self {
            sprites,
            remaining: width_descending_order(sprites),
            placed: vec![false; sprites.len()],
            placements: Vec::with_capacity(sprites.len()),
            columns: Vec::new(),
            stats: PackStats::default(),
            atlas_width: 0,
            atlas_height,
        }
    }

    fn run(&mut self) -> Result<(), PackError> {
        let sprites = self.sprites;
        while let Some(&widest) = self.remaining.first() {
            let sprite = &sprites[widest];
            let x = self.atlas_width;
            let right = x
                .checked_add(sprite.width)
                .ok_or(PackError::AtlasTooLarge)?;

            let before = self.placements.len();
            self.fill(Region::new(
                Point::new(x, 0),
                Point::new(right, self.atlas_height),
            ));

            // Unreachable while the height check in `pack` holds, since the
            // widest remaining sprite always fits its own empty column. Fails
            // instead of looping if that invariant is ever broken.
            if self.placements.len() == before {
                return Err(does_not_fit(widest, sprite, self.atlas_height));
            }

            self.columns.push(Column {
                x,
                width: sprite.width,
            });
            self.stats.columns += 1;
            self.atlas_width = right;

            let placed = &self.placed;
            self.remaining.retain(|&i| !placed[i]);
        }

        Ok(())
    }

    fn fill(&mut self, region: Region) {
        if region.is_empty() {
            return;
        }
        self.stats.regions_filled += 1;

        let sprites = self.sprites;
        let mut cursor = region.top_left;
        let mut filled_height = 0u32;

        for slot in 0..self.remaining.len() {
            let index = self.remaining[slot];
            if self.placed[index] {
                continue;
            }

            let sprite = &sprites[index];
            if sprite.height > region.height() - filled_height {
                continue;
            }
            if sprite.width > region.width() {
                continue;
            }

            self.placed[index] = true;
            self.placements.push(Placement {
                x: cursor.x,
                y: cursor.y,
                index,
                sprite: sprite.clone(),
            });

            if region.width() - sprite.width != 0 {
                self.stats.notch_fills += 1;
                self.fill(Region::new(
                    Point::new(cursor.x + sprite.width, cursor.y),
                    Point::new(cursor.x + region.width(), cursor.y + sprite.height),
                ));
            }

            cursor.y += sprite.height;
            filled_height += sprite.height;
        }
    }
}
