use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::pixel::PixelGrid;

/// Resampling filter used when the decoded image is not already at the
/// target resolution.
///
/// - `Nearest`   : no smoothing
/// - `Triangle`  : bilinear; the smooth scaling the mobile side uses
/// - `CatmullRom`: bicubic
/// - `Gaussian`
/// - `Lanczos3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(f: ResizeFilter) -> FilterType {
        match f {
            ResizeFilter::Nearest    => FilterType::Nearest,
            ResizeFilter::Triangle   => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian   => FilterType::Gaussian,
            ResizeFilter::Lanczos3   => FilterType::Lanczos3,
        }
    }
}

/// Decodes image bytes (PNG/JPEG/BMP/GIF) and produces a packed pixel grid at
/// exactly `width x height`.
///
/// An image that already has the target size is used as decoded, without a
/// resampling pass.
pub fn decode_to_grid(
    bytes: &[u8],
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<PixelGrid, BridgeError> {
    if width == 0 || height == 0 {
        return Err(BridgeError::InvalidDimensions {
            width,
            height,
            expected: width as u64 * height as u64,
            actual: 0,
        });
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| BridgeError::SourceUnavailable(format!("decode failed: {e}")))?;

    let img = if img.width() == width && img.height() == height {
        img
    } else {
        log::debug!(
            "resizing {}x{} -> {}x{} ({:?})",
            img.width(),
            img.height(),
            width,
            height,
            filter
        );
        img.resize_exact(width, height, filter.into())
    };

    Ok(PixelGrid::from_rgba(&img.to_rgba8()))
}
