pub mod decode;
pub mod locator;

pub use decode::{decode_to_grid, ResizeFilter};
pub use locator::ImageLocator;

use crate::error::BridgeError;
use crate::pixel::PixelGrid;

/// Upstream collaborator: turns an opaque locator into a grid already at the
/// requested resolution.
pub trait ImageSource: Send + Sync {
    fn acquire(&self, locator: &str, width: u32, height: u32) -> Result<PixelGrid, BridgeError>;
}

/// Reads images from the local filesystem (`file://` URIs or plain paths).
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    pub filter: ResizeFilter,
}

impl FileImageSource {
    pub fn new(filter: ResizeFilter) -> Self {
        FileImageSource { filter }
    }
}

impl ImageSource for FileImageSource {
    fn acquire(&self, locator: &str, width: u32, height: u32) -> Result<PixelGrid, BridgeError> {
        let ImageLocator::File(path) = ImageLocator::parse(locator)?;
        // The file handle is closed as soon as the bytes are read.
        let bytes = std::fs::read(&path).map_err(|e| {
            BridgeError::SourceUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        decode_to_grid(&bytes, width, height, self.filter)
    }
}
