//! JSON pack manifest.
//!
//! A manifest lists sprite sizes without pixel data. It drives `spritepack plan`
//! and lets build scripts precompute a layout before any image exists.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ManifestError, ValidationError, ValidationResult};
use crate::slice::{parse_slice, strip_slice};
use crate::sprite::SpriteDescriptor;

/// Input document for a packing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackManifest {
    /// Gutter in pixels around each sprite.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Sprites to pack, in input order.
    pub sprites: Vec<SpriteDescriptor>,
}

fn default_padding() -> u32 {
    0
}

impl PackManifest {
    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and validates a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let json = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&json)?;
        manifest.validate().into_result()?;
        Ok(manifest)
    }

    /// Validates sizes, names, and slice patterns.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.sprites.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NoSprites,
                "manifest declares no sprites",
                "sprites",
            ));
            return result;
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (i, sprite) in self.sprites.iter().enumerate() {
            if sprite.width == 0 || sprite.height == 0 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ZeroSize,
                    format!(
                        "sprite '{}' has zero size ({}x{})",
                        sprite.name, sprite.width, sprite.height
                    ),
                    format!("sprites[{}]", i),
                ));
            }

            if let Err(e) = parse_slice(&sprite.name) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidSlice,
                    e.to_string(),
                    format!("sprites[{}].name", i),
                ));
            }

            let key = strip_slice(&sprite.name);
            if key.is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::EmptyName,
                    "sprite name is empty",
                    format!("sprites[{}].name", i),
                ));
                continue;
            }

            if let Some(first) = seen.insert(key.clone(), i) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DuplicateName,
                    format!("sprite name '{}' already used by sprites[{}]", key, first),
                    format!("sprites[{}].name", i),
                ));
            }
        }

        result
    }
}
