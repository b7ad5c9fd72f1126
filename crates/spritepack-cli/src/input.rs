//! Sprite image loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spritepack_packer::png::read_rgba;
use spritepack_packer::SpriteSource;
use walkdir::WalkDir;

/// Lists the `.png` files directly inside `dir`, sorted by file name.
pub fn find_sprite_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        if entry.file_type().is_file() && is_png(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Decodes a single sprite file. The sprite is named after the file stem.
pub fn load_sprite(path: &Path) -> Result<SpriteSource> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid sprite file name: {}", path.display()))?;
    let image =
        read_rgba(path).with_context(|| format!("Failed to decode PNG: {}", path.display()))?;
    Ok(SpriteSource::new(name, image))
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritepack_packer::png::write_rgba;
    use spritepack_packer::{PngConfig, RgbaImage};

    #[test]
    fn test_find_sprite_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbaImage::new(2, 2, [1, 2, 3, 255]);
        for name in ["b.png", "a.PNG", "c.png"] {
            write_rgba(&image, &dir.path().join(name), &PngConfig::default()).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = find_sprite_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png", "c.png"]);
    }

    #[test]
    fn test_load_sprite_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel(1x1;3x3).png");
        write_rgba(&RgbaImage::new(4, 4, [9, 9, 9, 255]), &path, &PngConfig::default()).unwrap();

        let sprite = load_sprite(&path).unwrap();
        assert_eq!(sprite.name, "panel(1x1;3x3)");
        assert_eq!(sprite.image.width, 4);
    }

    #[test]
    fn test_missing_directory() {
        let err = find_sprite_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_corrupt_png_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"garbage").unwrap();

        let err = load_sprite(&dir.path().join("bad.png")).unwrap_err();
        assert!(err.to_string().contains("bad.png"));
    }
}
