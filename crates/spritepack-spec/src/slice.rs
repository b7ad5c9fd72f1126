//! Slice patterns embedded in sprite names.
//!
//! A sprite named `panel(4x4;28x28).png` carries an inner rectangle from
//! `(4, 4)` to `(28, 28)`, relative to the sprite's own top-left corner. UI code
//! uses that rectangle for nine-slice scaling. Names without a pattern have no
//! slice, and their exported slice rectangle is the whole frame.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metadata::PixelRect;

/// Pattern for `(x1xy1;x2xy2)` with decimal coordinates.
const SLICE_PATTERN: &str = r"\((\d+)x(\d+);(\d+)x(\d+)\)";

static SLICE_REGEX: OnceLock<Regex> = OnceLock::new();

fn slice_regex() -> &'static Regex {
    SLICE_REGEX.get_or_init(|| Regex::new(SLICE_PATTERN).expect("invalid regex pattern"))
}

/// Errors from slice pattern parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    /// A coordinate does not fit in 32 bits.
    #[error("slice coordinate '{value}' in '{name}' is out of range")]
    CoordinateOutOfRange { name: String, value: String },

    /// The bottom-right corner lies above or left of the top-left corner.
    #[error("slice in '{name}' is inverted: ({x1}, {y1}) to ({x2}, {y2})")]
    Inverted {
        name: String,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
    },
}

/// An inner rectangle relative to a sprite's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceSpec {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl SliceSpec {
    /// Width of the inner rectangle.
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    /// Height of the inner rectangle.
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Maps the slice into atlas coordinates for a sprite placed at `frame`.
    ///
    /// Corners past the frame edge are clamped to it.
    pub fn resolve(&self, frame: &PixelRect) -> PixelRect {
        let left = frame.x + self.x1.min(frame.width);
        let top = frame.y + self.y1.min(frame.height);
        let right = frame.x + self.x2.min(frame.width);
        let bottom = frame.y + self.y2.min(frame.height);
        PixelRect::new(left, top, right - left, bottom - top)
    }
}

/// Parses the first `(x1xy1;x2xy2)` pattern found in `name`.
///
/// Returns `Ok(None)` when the name carries no pattern.
pub fn parse_slice(name: &str) -> Result<Option<SliceSpec>, SliceError> {
    let Some(caps) = slice_regex().captures(name) else {
        return Ok(None);
    };

    let mut coords = [0u32; 4];
    for (slot, group) in coords.iter_mut().zip(1..=4) {
        let text = &caps[group];
        *slot = text.parse().map_err(|_| SliceError::CoordinateOutOfRange {
            name: name.to_string(),
            value: text.to_string(),
        })?;
    }

    let [x1, y1, x2, y2] = coords;
    if x2 < x1 || y2 < y1 {
        return Err(SliceError::Inverted {
            name: name.to_string(),
            x1,
            y1,
            x2,
            y2,
        });
    }

    Ok(Some(SliceSpec { x1, y1, x2, y2 }))
}

/// Removes the slice pattern from `name`, yielding the lookup key.
pub fn strip_slice(name: &str) -> String {
    slice_regex().replace(name, "").trim().to_string()
}
