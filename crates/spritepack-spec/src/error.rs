//! Error types for manifest validation and processing.

use thiserror::Error;

/// Error codes for manifest validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// V001: Manifest declares no sprites
    NoSprites,
    /// V002: Sprite has a zero width or height
    ZeroSize,
    /// V003: Two sprites share the same lookup name
    DuplicateName,
    /// V004: Sprite name is empty
    EmptyName,
    /// V005: Slice pattern in a sprite name is malformed
    InvalidSlice,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "V001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoSprites => "V001",
            ErrorCode::ZeroSize => "V002",
            ErrorCode::DuplicateName => "V003",
            ErrorCode::EmptyName => "V004",
            ErrorCode::InvalidSlice => "V005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "sprites\[2\].width").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for manifest loading.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest validation failed with one or more errors.
    #[error("manifest validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of manifest validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns true if validation passed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if validation failed.
    pub fn is_err(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Converts into a `Result`, consuming the collected errors.
    pub fn into_result(self) -> Result<(), ManifestError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ManifestError::ValidationFailed(self.errors))
        }
    }
}
