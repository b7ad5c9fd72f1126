//! SpritePack Packing Engine
//!
//! This crate packs rectangular sprites into a single atlas and composes the
//! atlas texture. Packing is a greedy column heuristic: the atlas height is
//! fixed from the total sprite area, columns are opened left to right at the
//! width of the widest unplaced sprite, and the space beside each narrower
//! sprite is filled recursively.
//!
//! # Example
//!
//! ```
//! use spritepack_packer::pack;
//! use spritepack_spec::SpriteDescriptor;
//!
//! let sprites = vec![
//!     SpriteDescriptor::new("a", 10, 10),
//!     SpriteDescriptor::new("b", 10, 10),
//! ];
//!
//! let layout = pack(&sprites, 0).unwrap();
//! assert_eq!(layout.height, 15);
//! assert_eq!(layout.width, 20);
//! ```
//!
//! # Determinism
//!
//! The same input in the same order always produces the same layout, and the
//! PNG encoder uses fixed settings so composed atlases are byte-identical.

pub mod atlas;
pub mod engine;
pub mod image;
pub mod layout;
pub mod png;
pub mod region;

// Re-export main types for convenience
pub use atlas::{
    build_atlas, build_metadata, compose_atlas, padded_descriptor, plan_manifest, AtlasError,
    AtlasOutput, SpriteSource, MAX_TEXTURE_DIMENSION,
};
pub use engine::{estimate_atlas_height, pack, width_descending_order, PackError};
pub use image::RgbaImage;
pub use layout::{AtlasLayout, Column, PackStats, Placement};
pub use png::{PngConfig, PngError};
pub use region::{Point, Region};
