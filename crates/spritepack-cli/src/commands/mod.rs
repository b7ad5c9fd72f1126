//! CLI command implementations

pub mod json_output;
pub mod pack;
pub mod plan;
pub mod slices;
