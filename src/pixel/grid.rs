use image::RgbaImage;

/// A rectangular grid of packed `0xAARRGGBB` pixels in row-major order.
///
/// The grid does not check that `pixels.len() == width * height`; that is the
/// normalizer's job, so a mis-sized grid can still reach it and be rejected
/// with a proper error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        PixelGrid { width, height, pixels }
    }

    /// Packs an RGBA buffer as `0xAARRGGBB`, the layout `getPixels` hands out
    /// on the platform side.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                pack_argb(a, r, g, b)
            })
            .collect();
        PixelGrid { width: img.width(), height: img.height(), pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels actually stored.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// Packs four 8-bit channels into one `0xAARRGGBB` word.
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Extracts `[R, G, B]` from a packed pixel; the top byte (alpha) is dropped.
pub fn unpack_rgb(p: u32) -> [u8; 3] {
    [((p >> 16) & 0xFF) as u8, ((p >> 8) & 0xFF) as u8, (p & 0xFF) as u8]
}
