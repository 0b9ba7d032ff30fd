use crate::error::BridgeError;
use crate::pixel::grid::{unpack_rgb, PixelGrid};

/// Maps one 8-bit channel value onto [0, 1].
pub fn normalize_channel(c: u8) -> f32 {
    c as f32 / 255.0
}

/// Flattens a grid into normalized `R, G, B, R, G, B, ...` floats.
///
/// The grid must already be at `target_width x target_height`; resizing is the
/// image source's concern. Returns a buffer of exactly
/// `target_width * target_height * 3` values, pixel `i` at `[3i, 3i + 1, 3i + 2]`.
/// Alpha is ignored, every pixel is treated as opaque.
pub fn normalize(
    grid: &PixelGrid,
    target_width: u32,
    target_height: u32,
) -> Result<Vec<f32>, BridgeError> {
    let expected = target_width as u64 * target_height as u64;
    if expected == 0 || grid.len() as u64 != expected {
        return Err(BridgeError::InvalidDimensions {
            width: target_width,
            height: target_height,
            expected,
            actual: grid.len(),
        });
    }

    let mut out = Vec::with_capacity(grid.len() * 3);
    for &p in grid.pixels() {
        out.extend(unpack_rgb(p).map(normalize_channel));
    }
    Ok(out)
}
