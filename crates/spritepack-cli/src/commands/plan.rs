//! Plan command implementation
//!
//! Packs a JSON manifest of sprite sizes and reports the layout without
//! touching any pixel data.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use spritepack_packer::{plan_manifest, AtlasLayout};
use spritepack_spec::{AtlasMetadata, PackManifest};

use super::json_output::{
    atlas_error_to_json, error_codes, manifest_error_to_json, print_json, JsonError, PlanOutput,
    PlanResult,
};

/// Run the plan command
///
/// # Arguments
/// * `manifest_path` - Path to the pack manifest
/// * `output` - Optional file to write the metadata to (default: stdout)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
pub fn run(manifest_path: &str, output: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(manifest_path, output)
    } else {
        run_human(manifest_path, output)
    }
}

fn run_human(manifest_path: &str, output: Option<&str>) -> Result<ExitCode> {
    println!("{} {}", "Planning:".cyan().bold(), manifest_path);

    let (layout, metadata) = match plan(manifest_path) {
        Ok(planned) => planned,
        Err(errors) => {
            for error in &errors {
                let path = error
                    .path
                    .as_ref()
                    .map(|p| format!(" at {}", p))
                    .unwrap_or_default();
                println!("  {} {}{}: {}", "x".red(), error.code, path.dimmed(), error.message);
            }
            println!("\n{} {} error(s)", "FAILED".red().bold(), errors.len());
            return Ok(ExitCode::from(1));
        }
    };

    println!(
        "{} {}x{}, {} column(s), {:.1}% filled",
        "Layout:".dimmed(),
        layout.width,
        layout.height,
        layout.stats.columns,
        layout.fill_ratio() * 100.0
    );

    for frame in &metadata.sprites {
        println!(
            "  {} {} @ ({}, {}) {}x{}",
            "ok".green(),
            frame.name,
            frame.frame.x,
            frame.frame.y,
            frame.frame.width,
            frame.frame.height
        );
    }

    if let Some(path) = output {
        write_metadata(&metadata, Path::new(path))?;
        println!("  {} {}", "->".green(), path);
    }

    println!("\n{} {} sprite(s) placed", "SUCCESS".green().bold(), metadata.sprites.len());
    Ok(ExitCode::SUCCESS)
}

fn run_json(manifest_path: &str, output: Option<&str>) -> Result<ExitCode> {
    let (layout, metadata) = match plan(manifest_path) {
        Ok(planned) => planned,
        Err(errors) => {
            print_json(&PlanOutput::failure(errors))?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = match output {
        Some(path) => {
            if let Err(e) = write_metadata(&metadata, Path::new(path)) {
                let error =
                    JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)).with_file(path);
                print_json(&PlanOutput::failure(vec![error]))?;
                return Ok(ExitCode::from(1));
            }
            PlanResult {
                columns: layout.stats.columns,
                fill_ratio: layout.fill_ratio(),
                output_path: Some(path.to_string()),
                metadata: None,
            }
        }
        None => PlanResult {
            columns: layout.stats.columns,
            fill_ratio: layout.fill_ratio(),
            output_path: None,
            metadata: Some(metadata),
        },
    };

    print_json(&PlanOutput::success(result))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads, validates, and packs a manifest.
fn plan(manifest_path: &str) -> Result<(AtlasLayout, AtlasMetadata), Vec<JsonError>> {
    let manifest = PackManifest::load(Path::new(manifest_path))
        .map_err(|e| manifest_error_to_json(&e, manifest_path))?;
    plan_manifest(&manifest).map_err(|e| vec![atlas_error_to_json(&e).with_file(manifest_path)])
}

fn write_metadata(metadata: &AtlasMetadata, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write metadata: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &Path, json: &str) -> String {
        let path = dir.join("manifest.json");
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_plan_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"sprites": [
                {"name": "a", "width": 10, "height": 10},
                {"name": "b", "width": 10, "height": 10}
            ]}"#,
        );

        let (layout, metadata) = plan(&path).unwrap();
        assert_eq!((layout.width, layout.height), (20, 15));
        assert_eq!(metadata.sprites.len(), 2);
    }

    #[test]
    fn test_plan_reports_validation_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"sprites": [{"name": "a", "width": 0, "height": 4}]}"#,
        );

        let errors = plan(&path).unwrap_err();
        assert_eq!(errors[0].code, "V002");
        assert_eq!(errors[0].path.as_deref(), Some("sprites[0]"));
    }

    #[test]
    fn test_plan_missing_file() {
        let errors = plan("/no/such/manifest.json").unwrap_err();
        assert_eq!(errors[0].code, error_codes::FILE_READ);
    }

    #[test]
    fn test_plan_sprite_too_tall() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"sprites": [{"name": "pole", "width": 1, "height": 100}]}"#,
        );

        let errors = plan(&path).unwrap_err();
        assert_eq!(errors[0].code, error_codes::PACK_FAILED);
    }

    #[test]
    fn test_plan_huge_padding_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"padding": 2147483648, "sprites": [{"name": "a", "width": 4, "height": 4}]}"#,
        );

        let errors = plan(&path).unwrap_err();
        assert_eq!(errors[0].code, error_codes::PACK_FAILED);
    }

    #[test]
    fn test_write_metadata_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"padding": 1, "sprites": [{"name": "tile", "width": 4, "height": 4}]}"#,
        );
        let (_, metadata) = plan(&path).unwrap();

        let out = dir.path().join("layout.json");
        write_metadata(&metadata, &out).unwrap();
        let parsed: AtlasMetadata =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, metadata);
    }
}
