//! Deterministic PNG reading and writing.
//!
//! Encoding uses fixed compression and filter settings so the same atlas
//! always produces byte-identical files. Decoding normalizes every 8-bit and
//! 16-bit color type to RGBA8.

use std::io::{Read, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::image::RgbaImage;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Unsupported color type: {0:?}")]
    UnsupportedColor(ColorType),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Encoder settings for atlas output.
///
/// Both fields are fixed per run; output bytes depend only on the pixels and
/// these two settings.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Encodes `image` as an 8-bit RGBA PNG into `writer`.
///
/// Only the header and image data chunks are emitted.
pub fn encode_rgba<W: Write>(
    image: &RgbaImage,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if image.width == 0 || image.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode {}x{} image",
            image.width, image.height
        )));
    }

    let mut encoder = Encoder::new(writer, image.width, image.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);
    encoder.write_header()?.write_image_data(&image.pixels)?;
    Ok(())
}

/// Encodes `image` and writes it to `path`.
pub fn write_rgba(image: &RgbaImage, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let mut data = Vec::new();
    encode_rgba(image, &mut data, config)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Write to a Vec<u8> and return the hash.
pub fn write_rgba_to_vec_with_hash(
    image: &RgbaImage,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    encode_rgba(image, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Read a PNG file into an RGBA image.
pub fn read_rgba(path: &Path) -> Result<RgbaImage, PngError> {
    let file = std::fs::File::open(path)?;
    decode_rgba(std::io::BufReader::new(file))
}

/// Decode PNG data from any reader into an RGBA image.
///
/// Palette and low bit-depth images are expanded, 16-bit channels are
/// stripped to 8 bits, and missing alpha becomes fully opaque.
pub fn decode_rgba<R: Read>(reader: R) -> Result<RgbaImage, PngError> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let pixel_count = info.width as usize * info.height as usize;
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    match info.color_type {
        ColorType::Rgba => pixels = buf,
        ColorType::Rgb => {
            for px in buf.chunks_exact(3) {
                pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        ColorType::GrayscaleAlpha => {
            for px in buf.chunks_exact(2) {
                pixels.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
        }
        ColorType::Grayscale => {
            for &v in &buf {
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        other => return Err(PngError::UnsupportedColor(other)),
    }

    RgbaImage::from_raw(info.width, info.height, pixels).ok_or_else(|| {
        PngError::InvalidDimensions(format!(
            "decoded buffer does not match {}x{}",
            info.width, info.height
        ))
    })
}
