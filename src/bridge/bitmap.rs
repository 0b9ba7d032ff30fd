use std::sync::Arc;

use serde_json::Value;

use crate::bridge::module::{string_arg, unknown_method, NativeModule};
use crate::bridge::promise::Promise;
use crate::error::BridgeError;
use crate::pixel::normalize;
use crate::source::ImageSource;

/// Loads an image from a locator, resizes it to the target resolution and
/// answers with a flat `[R, G, B, ...]` array normalized to [0, 1].
pub struct BitmapModule {
    source: Arc<dyn ImageSource>,
    target_width: u32,
    target_height: u32,
}

impl BitmapModule {
    pub const NAME: &'static str = "BitmapModule";
    pub const GET_NORMALIZED_PIXELS: &'static str = "getNormalizedPixels";

    pub fn new(source: Arc<dyn ImageSource>, target_width: u32, target_height: u32) -> Self {
        BitmapModule { source, target_width, target_height }
    }

    pub fn normalized_pixels(&self, locator: &str) -> Result<Vec<f32>, BridgeError> {
        let grid = self.source.acquire(locator, self.target_width, self.target_height)?;
        normalize(&grid, self.target_width, self.target_height)
    }

    fn get_normalized_pixels(&self, args: &[Value]) -> Result<Value, BridgeError> {
        let locator = string_arg(args, 0, "imageUri")?;
        let pixels = self.normalized_pixels(locator)?;
        log::info!("normalized {} values from {locator}", pixels.len());
        // The scripting side has no f32 arrays; every value goes out as a double.
        Ok(Value::Array(pixels.into_iter().map(|v| Value::from(v as f64)).collect()))
    }
}

impl NativeModule for BitmapModule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn methods(&self) -> &'static [&'static str] {
        &[Self::GET_NORMALIZED_PIXELS]
    }

    fn invoke(&self, method: &str, args: &[Value], promise: Promise) {
        let result = match method {
            Self::GET_NORMALIZED_PIXELS => self.get_normalized_pixels(args),
            _ => Err(unknown_method(Self::NAME, method)),
        };
        if let Err(e) = &result {
            log::warn!("{}.{method} failed: {e}", Self::NAME);
        }
        promise.complete(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelGrid;
    use serde_json::json;

    /// Hands out a fixed grid regardless of the requested size.
    struct FixedSource(PixelGrid);

    impl ImageSource for FixedSource {
        fn acquire(&self, locator: &str, _w: u32, _h: u32) -> Result<PixelGrid, BridgeError> {
            if locator == "missing" {
                return Err(BridgeError::SourceUnavailable("missing".into()));
            }
            Ok(self.0.clone())
        }
    }

    fn module(grid: PixelGrid, w: u32, h: u32) -> BitmapModule {
        BitmapModule::new(Arc::new(FixedSource(grid)), w, h)
    }

    fn call(m: &BitmapModule, method: &str, args: Vec<Value>) -> Result<Value, String> {
        let (promise, pending) = Promise::channel();
        m.invoke(method, &args, promise);
        pending.wait().map_err(|r| r.code)
    }

    #[test]
    fn resolves_with_double_array() {
        let m = module(PixelGrid::new(2, 1, vec![0x00FF_0000, 0x0000_FF00]), 2, 1);
        let v = call(&m, "getNormalizedPixels", vec![json!("any")]).unwrap();
        assert_eq!(v, json!([1.0, 0.0, 0.0, 0.0, 1.0, 0.0]));
    }

    #[test]
    fn mis_sized_grid_rejects_without_partial_buffer() {
        let m = module(PixelGrid::new(2, 2, vec![0; 4]), 224, 224);
        assert_eq!(call(&m, "getNormalizedPixels", vec![json!("any")]).unwrap_err(), "E_INVALID_DIMENSIONS");
    }

    #[test]
    fn source_failure_and_bad_arguments_reject() {
        let m = module(PixelGrid::new(1, 1, vec![0]), 1, 1);
        assert_eq!(call(&m, "getNormalizedPixels", vec![json!("missing")]).unwrap_err(), "E_SOURCE_UNAVAILABLE");
        assert_eq!(call(&m, "getNormalizedPixels", vec![]).unwrap_err(), "E_INVALID_ARGUMENT");
        assert_eq!(call(&m, "resize", vec![json!("any")]).unwrap_err(), "E_UNKNOWN_METHOD");
    }
}
