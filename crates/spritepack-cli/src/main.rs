//! SpritePack CLI - Command-line interface for sprite atlas packing
//!
//! This binary packs a directory of sprite images into one atlas texture
//! with a JSON lookup table, and offers dry-run and inspection commands.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use spritepack_cli::commands;
use spritepack_cli::commands::pack::PackArgs;

/// SpritePack - Sprite Atlas Packer
#[derive(Parser)]
#[command(name = "spritepack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack every PNG in a directory into an atlas texture and lookup table
    Pack {
        /// Directory holding the sprite PNGs (not searched recursively)
        #[arg(short, long)]
        input_dir: String,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// File stem for the atlas outputs (default: atlas)
        #[arg(short, long)]
        name: Option<String>,

        /// Gutter in pixels added around each sprite
        #[arg(short, long, default_value_t = 0)]
        padding: u32,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Pack a JSON manifest of sprite sizes and report the layout
    Plan {
        /// Path to the pack manifest
        #[arg(short, long)]
        manifest: String,

        /// Write the layout metadata to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the lookup key and slice rectangle encoded in sprite names
    Slices {
        /// Sprite names to inspect
        #[arg(required = true)]
        names: Vec<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack {
            input_dir,
            out_root,
            name,
            padding,
            json,
        } => {
            let args = PackArgs {
                input_dir: &input_dir,
                out_root: out_root.as_deref(),
                name: name.as_deref(),
                padding,
            };
            commands::pack::run(&args, json)
        }
        Commands::Plan {
            manifest,
            output,
            json,
        } => commands::plan::run(&manifest, output.as_deref(), json),
        Commands::Slices { names, json } => commands::slices::run(&names, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
