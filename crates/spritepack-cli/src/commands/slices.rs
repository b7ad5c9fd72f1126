//! Slices command implementation
//!
//! Shows how sprite names map to lookup keys and nine-slice rectangles.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use spritepack_spec::{parse_slice, strip_slice};

use super::json_output::{error_codes, print_json, JsonError, SliceEntry, SlicesOutput};

/// Run the slices command
///
/// # Returns
/// Exit code: 0 if every name parsed, 1 if any slice pattern is malformed
pub fn run(names: &[String], json_output: bool) -> Result<ExitCode> {
    let (entries, errors) = inspect(names);
    let code = if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };

    if json_output {
        print_json(&SlicesOutput {
            success: errors.is_empty(),
            errors,
            result: entries,
        })?;
        return Ok(code);
    }

    for entry in &entries {
        match entry.slice {
            Some(slice) => println!(
                "  {} {} -> {} ({}x{} to {}x{}, inner {}x{})",
                "ok".green(),
                entry.name,
                entry.key.cyan(),
                slice.x1,
                slice.y1,
                slice.x2,
                slice.y2,
                slice.width(),
                slice.height()
            ),
            None => println!(
                "  {} {} -> {} {}",
                "ok".green(),
                entry.name,
                entry.key.cyan(),
                "(no slice)".dimmed()
            ),
        }
    }
    for error in &errors {
        println!("  {} {}: {}", "x".red(), error.code, error.message);
    }

    Ok(code)
}

/// Parses each name, collecting entries for valid names and errors for the rest.
fn inspect(names: &[String]) -> (Vec<SliceEntry>, Vec<JsonError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for (i, name) in names.iter().enumerate() {
        match parse_slice(name) {
            Ok(slice) => entries.push(SliceEntry {
                name: name.clone(),
                key: strip_slice(name),
                slice,
            }),
            Err(e) => errors.push(
                JsonError::new(error_codes::INVALID_SLICE, e.to_string())
                    .with_path(format!("names[{}]", i)),
            ),
        }
    }

    (entries, errors)
}
