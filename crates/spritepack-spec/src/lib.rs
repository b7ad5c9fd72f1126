//! SpritePack Data Types
//!
//! This crate holds the serializable types shared by the packing engine and the
//! command-line tool: sprite descriptors, pack manifests, the atlas lookup table
//! written next to the composed texture, and the slice-pattern parser.
//!
//! # Example
//!
//! ```
//! use spritepack_spec::{PackManifest, SpriteDescriptor};
//!
//! let manifest = PackManifest {
//!     padding: 1,
//!     sprites: vec![
//!         SpriteDescriptor::new("hero", 32, 48),
//!         SpriteDescriptor::new("button(4x4;12x12)", 16, 16),
//!     ],
//! };
//!
//! let result = manifest.validate();
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Validation error codes and result types
//! - [`sprite`]: Sprite descriptor value type
//! - [`manifest`]: JSON pack manifest and its validation
//! - [`metadata`]: Atlas lookup table types
//! - [`slice`]: Parsing of `(x1xy1;x2xy2)` slice patterns embedded in names

pub mod error;
pub mod manifest;
pub mod metadata;
pub mod slice;
pub mod sprite;

pub use error::{ErrorCode, ManifestError, ValidationError, ValidationResult};
pub use manifest::PackManifest;
pub use metadata::{AtlasMetadata, PixelRect, SpriteFrame};
pub use slice::{parse_slice, strip_slice, SliceError, SliceSpec};
pub use sprite::SpriteDescriptor;
