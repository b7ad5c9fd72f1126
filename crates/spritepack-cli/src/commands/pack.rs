//! Pack command implementation
//!
//! Packs every PNG in a directory into one atlas texture plus a JSON lookup
//! table.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use spritepack_packer::build_atlas;

use super::json_output::{
    atlas_error_to_json, error_codes, print_json, JsonError, PackOutput, PackResult,
};
use crate::input::{find_sprite_files, load_sprite};

/// Default file stem for the atlas outputs.
pub const DEFAULT_ATLAS_NAME: &str = "atlas";

/// Arguments for a pack run.
#[derive(Debug, Clone)]
pub struct PackArgs<'a> {
    pub input_dir: &'a str,
    pub out_root: Option<&'a str>,
    pub name: Option<&'a str>,
    pub padding: u32,
}

impl PackArgs<'_> {
    fn atlas_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("{}.png", self.name.unwrap_or(DEFAULT_ATLAS_NAME)))
    }

    fn metadata_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("{}.json", self.name.unwrap_or(DEFAULT_ATLAS_NAME)))
    }

    fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.out_root.unwrap_or("."))
    }
}

/// Run the pack command
///
/// # Returns
/// Exit code: 0 on success, 1 if any sprite could not be loaded or packed
pub fn run(args: &PackArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn run_human(args: &PackArgs<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Packing:".cyan().bold(), args.input_dir);
    if args.padding > 0 {
        println!("{} {}px", "Padding:".dimmed(), args.padding);
    }

    match execute(args) {
        Ok(result) => {
            println!(
                "{} {} sprite(s) into {}x{} ({:.1}% filled)",
                "Packed".green(),
                result.sprite_count,
                result.width,
                result.height,
                result.fill_ratio * 100.0
            );
            println!("{} {}", "Hash:".dimmed(), &result.hash[..16]);
            println!("  {} {}", "->".green(), result.atlas_path);
            println!("  {} {}", "->".green(), result.metadata_path);
            println!(
                "\n{} Atlas written ({}ms)",
                "SUCCESS".green().bold(),
                start.elapsed().as_millis()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let location = error
                .file
                .as_ref()
                .map(|f| format!(" {}", f))
                .unwrap_or_default();
            println!("  {} {}{}: {}", "x".red(), error.code, location.dimmed(), error.message);
            println!("\n{} Atlas not written", "FAILED".red().bold());
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(args: &PackArgs<'_>) -> Result<ExitCode> {
    let (output, code) = match execute(args) {
        Ok(result) => (PackOutput::success(result), ExitCode::SUCCESS),
        Err(error) => (PackOutput::failure(vec![error]), ExitCode::from(1)),
    };
    print_json(&output)?;
    Ok(code)
}

/// Loads, packs, and writes the atlas.
///
/// Nothing is written unless every sprite loads and packs.
pub fn execute(args: &PackArgs<'_>) -> Result<PackResult, JsonError> {
    let input_dir = Path::new(args.input_dir);
    let files = find_sprite_files(input_dir).map_err(|e| {
        JsonError::new(error_codes::FILE_READ, format!("{:#}", e)).with_file(args.input_dir)
    })?;

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        let source = load_sprite(path).map_err(|e| {
            JsonError::new(error_codes::IMAGE_DECODE, format!("{:#}", e))
                .with_file(path.display().to_string())
        })?;
        sources.push(source);
    }

    let output = build_atlas(&sources, args.padding).map_err(|e| atlas_error_to_json(&e))?;

    let atlas_path = args.atlas_path();
    let metadata_path = args.metadata_path();
    let output_dir = args.output_dir();
    std::fs::create_dir_all(&output_dir).map_err(|e| write_error(&output_dir, e))?;
    std::fs::write(&atlas_path, &output.png_data).map_err(|e| write_error(&atlas_path, e))?;

    let metadata_json = serde_json::to_string_pretty(&output.metadata)
        .map_err(|e| write_error(&metadata_path, e))?;
    std::fs::write(&metadata_path, metadata_json).map_err(|e| write_error(&metadata_path, e))?;

    Ok(PackResult {
        atlas_path: atlas_path.display().to_string(),
        metadata_path: metadata_path.display().to_string(),
        width: output.layout.width,
        height: output.layout.height,
        sprite_count: sources.len(),
        padding: args.padding,
        hash: output.hash,
        fill_ratio: output.layout.fill_ratio(),
    })
}

fn write_error(path: &Path, error: impl std::fmt::Display) -> JsonError {
    JsonError::new(error_codes::FILE_WRITE, error.to_string()).with_file(path.display().to_string())
}
