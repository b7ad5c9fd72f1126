//! RGBA8 pixel buffers.

/// A row-major RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data, four bytes per pixel.
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Create a new image filled with a color.
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let size = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(size * 4);
        for _ in 0..size {
            pixels.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a fully transparent image.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, [0, 0, 0, 0])
    }

    /// Wrap existing RGBA bytes. Returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Returns a copy enlarged by `padding` on every side, or `None` when the
    /// padded size does not fit in 32 bits.
    ///
    /// The gutter replicates the nearest edge pixel so that filtering and
    /// mipmapping near sprite borders do not bleed in neighbouring sprites.
    pub fn with_padding(&self, padding: u32) -> Option<RgbaImage> {
        if padding == 0 {
            return Some(self.clone());
        }

        let width = padded_extent(self.width, padding)?;
        let height = padded_extent(self.height, padding)?;
        let mut out = RgbaImage::transparent(width, height);

        // Nothing to replicate from an empty image
        if self.width == 0 || self.height == 0 {
            return Some(out);
        }

        for y in 0..height {
            let sy = y.saturating_sub(padding).min(self.height - 1);
            for x in 0..width {
                let sx = x.saturating_sub(padding).min(self.width - 1);
                out.set(x, y, self.get(sx, sy));
            }
        }

        Some(out)
    }

    /// Copies `src` into this image with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside this image are dropped.
    pub fn blit(&mut self, src: &RgbaImage, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cols = src.width.min(self.width - x) as usize;
        let rows = src.height.min(self.height - y);

        for row in 0..rows {
            let from = src.offset(0, row);
            let to = self.offset(x, y + row);
            self.pixels[to..to + cols * 4].copy_from_slice(&src.pixels[from..from + cols * 4]);
        }
    }
}

/// `extent + 2 * padding`, or `None` on overflow.
pub fn padded_extent(extent: u32, padding: u32) -> Option<u32> {
    padding.checked_mul(2)?.checked_add(extent)
}
