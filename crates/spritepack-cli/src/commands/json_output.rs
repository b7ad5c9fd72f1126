//! JSON output types for machine-readable CLI output.
//!
//! Every `--json` run prints exactly one envelope with `success`, `errors`
//! and an optional `result`, so scripts can parse the output without
//! scraping colored text.

use serde::{Deserialize, Serialize};
use spritepack_packer::{AtlasError, PackError};
use spritepack_spec::{AtlasMetadata, ManifestError, SliceSpec, ValidationError};

/// Error codes for CLI operations.
///
/// These codes are stable. Manifest validation errors pass their own
/// `V0xx` codes through instead.
pub mod error_codes {
    /// File or directory could not be read
    pub const FILE_READ: &str = "SP_001";
    /// Sprite image could not be decoded
    pub const IMAGE_DECODE: &str = "SP_002";
    /// JSON parse error
    pub const JSON_PARSE: &str = "SP_003";
    /// Input directory holds no sprites
    pub const NO_SPRITES: &str = "SP_004";
    /// Packing failed
    pub const PACK_FAILED: &str = "SP_005";
    /// A sprite name carries a malformed slice pattern
    pub const INVALID_SLICE: &str = "SP_006";
    /// Two sprites share a lookup name
    pub const DUPLICATE_NAME: &str = "SP_007";
    /// Output could not be written
    pub const FILE_WRITE: &str = "SP_008";
    /// PNG encoding error
    pub const IMAGE_ENCODE: &str = "SP_009";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "SP_001", "V002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the source file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Converts a manifest validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), error.message.clone());
    match &error.path {
        Some(path) => json.with_path(path.clone()),
        None => json,
    }
}

/// Converts a manifest loading error into one or more JSON errors.
pub fn manifest_error_to_json(error: &ManifestError, file: &str) -> Vec<JsonError> {
    match error {
        ManifestError::ValidationFailed(errors) => errors
            .iter()
            .map(|e| validation_error_to_json(e).with_file(file))
            .collect(),
        ManifestError::JsonParse(e) => {
            vec![JsonError::new(error_codes::JSON_PARSE, e.to_string()).with_file(file)]
        }
        ManifestError::Io(e) => {
            vec![JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(file)]
        }
    }
}

/// Converts an atlas build error.
pub fn atlas_error_to_json(error: &AtlasError) -> JsonError {
    let code = match error {
        AtlasError::Pack(PackError::EmptyInput) => error_codes::NO_SPRITES,
        AtlasError::Pack(_) | AtlasError::TextureTooLarge { .. } => error_codes::PACK_FAILED,
        AtlasError::Slice(_) => error_codes::INVALID_SLICE,
        AtlasError::Png(_) => error_codes::IMAGE_ENCODE,
        AtlasError::DuplicateName(_) => error_codes::DUPLICATE_NAME,
    };
    JsonError::new(code, error.to_string())
}

/// Summary of a written atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackResult {
    /// Path of the atlas texture
    pub atlas_path: String,
    /// Path of the lookup table
    pub metadata_path: String,
    pub width: u32,
    pub height: u32,
    pub sprite_count: usize,
    pub padding: u32,
    /// BLAKE3 hash of the atlas PNG
    pub hash: String,
    /// Fraction of the atlas covered by padded sprites
    pub fill_ratio: f64,
}

/// Output of `pack --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PackResult>,
}

impl PackOutput {
    pub fn success(result: PackResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Layout computed from a manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanResult {
    pub columns: usize,
    pub fill_ratio: f64,
    /// Set when the metadata was written to a file instead of embedded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AtlasMetadata>,
}

/// Output of `plan --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PlanResult>,
}

impl PlanOutput {
    pub fn success(result: PlanResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Parsed slice pattern for one name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SliceEntry {
    /// Name as given
    pub name: String,
    /// Lookup key with the pattern removed
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<SliceSpec>,
}

/// Output of `slices --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlicesOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub result: Vec<SliceEntry>,
}

/// Prints an envelope as pretty JSON.
pub fn print_json<T: Serialize>(output: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spritepack_spec::ErrorCode;

    #[test]
    fn test_json_error_skips_empty_fields() {
        let error = JsonError::new(error_codes::FILE_READ, "missing");
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"code":"SP_001","message":"missing"}"#);
    }

    #[test]
    fn test_validation_error_keeps_code_and_path() {
        let error = ValidationError::with_path(ErrorCode::ZeroSize, "zero", "sprites[1].width");
        let json = validation_error_to_json(&error);
        assert_eq!(json.code, "V002");
        assert_eq!(json.path.as_deref(), Some("sprites[1].width"));
    }

    #[test]
    fn test_manifest_validation_errors_expand() {
        let error = ManifestError::ValidationFailed(vec![
            ValidationError::new(ErrorCode::NoSprites, "empty"),
            ValidationError::new(ErrorCode::DuplicateName, "dup"),
        ]);
        let errors = manifest_error_to_json(&error, "m.json");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "V001");
        assert_eq!(errors[1].file.as_deref(), Some("m.json"));
    }

    #[test]
    fn test_atlas_error_codes() {
        assert_eq!(
            atlas_error_to_json(&AtlasError::Pack(PackError::EmptyInput)).code,
            error_codes::NO_SPRITES
        );
        assert_eq!(
            atlas_error_to_json(&AtlasError::Pack(PackError::AtlasTooLarge)).code,
            error_codes::PACK_FAILED
        );
        assert_eq!(
            atlas_error_to_json(&AtlasError::TextureTooLarge {
                width: 20000,
                height: 20000,
                max: 16384
            })
            .code,
            error_codes::PACK_FAILED
        );
        assert_eq!(
            atlas_error_to_json(&AtlasError::DuplicateName("a".into())).code,
            error_codes::DUPLICATE_NAME
        );
    }

    #[test]
    fn test_failure_envelope_omits_result() {
        let output = PackOutput::failure(vec![JsonError::new(error_codes::NO_SPRITES, "none")]);
        let value: serde_json::Value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
    }
}
