//! End-to-end atlas tests through the filesystem.

use spritepack_packer::png::{read_rgba, write_rgba};
use spritepack_packer::{build_atlas, PngConfig, RgbaImage, SpriteSource};
use spritepack_spec::{AtlasMetadata, PixelRect};

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::new(width, height, rgba)
}

#[test]
fn test_written_atlas_reads_back() {
    let dir = tempfile::tempdir().unwrap();

    let sources = vec![
        SpriteSource::new("wide", solid(20, 5, [255, 0, 0, 255])),
        SpriteSource::new("left", solid(10, 5, [0, 255, 0, 255])),
        SpriteSource::new("right", solid(10, 5, [0, 0, 255, 255])),
    ];
    let output = build_atlas(&sources, 0).unwrap();

    let png_path = dir.path().join("atlas.png");
    write_rgba(&output.image, &png_path, &PngConfig::default()).unwrap();
    let bytes = std::fs::read(&png_path).unwrap();
    assert_eq!(bytes, output.png_data);

    let decoded = read_rgba(&png_path).unwrap();
    assert_eq!(decoded, output.image);

    // wide spans the column; left goes under it; right fills the notch beside left
    assert_eq!(decoded.get(19, 0), [255, 0, 0, 255]);
    assert_eq!(decoded.get(0, 5), [0, 255, 0, 255]);
    assert_eq!(decoded.get(10, 5), [0, 0, 255, 255]);
    // Unused space stays transparent
    assert_eq!(decoded.get(0, 14), [0, 0, 0, 0]);
}

#[test]
fn test_metadata_json_roundtrip() {
    let sources = vec![
        SpriteSource::new("button(3x3;13x5)", solid(16, 8, [200, 200, 200, 255])),
        SpriteSource::new("icon", solid(8, 8, [10, 10, 10, 255])),
    ];
    let output = build_atlas(&sources, 2).unwrap();

    let json = serde_json::to_string_pretty(&output.metadata).unwrap();
    let parsed: AtlasMetadata = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, output.metadata);

    let button = parsed.get("button").unwrap();
    assert_eq!(button.frame.width, 16);
    assert_eq!(button.frame.height, 8);
    assert_eq!(
        button.slice,
        PixelRect::new(button.frame.x + 3, button.frame.y + 3, 10, 2)
    );

    let icon = parsed.get("icon").unwrap();
    assert_eq!(icon.slice, icon.frame);
    assert!(!button.frame.intersects(&icon.frame));
}
