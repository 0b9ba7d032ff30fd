pub mod bridge;
pub mod classify;
pub mod config;
pub mod error;
pub mod pixel;
pub mod source;

// Convenience re-exports
pub use bridge::{BitmapModule, ModuleRegistry, NativeModule, Promise, Rejection};
pub use classify::{interpret, ConfidencePolicy, Prediction};
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use pixel::{normalize, PixelGrid};
pub use source::{FileImageSource, ImageSource, ResizeFilter};
