use std::sync::Arc;

use crate::bridge::bitmap::BitmapModule;
use crate::bridge::module::NativeModule;
use crate::bridge::predictor::PredictorModule;
use crate::config::BridgeConfig;
use crate::source::FileImageSource;

/// A provider of native modules, collected once at startup.
pub trait Package {
    fn create_native_modules(&self, config: &BridgeConfig) -> Vec<Arc<dyn NativeModule>>;
}

/// Image preprocessing and score interpretation.
pub struct BitmapPackage;

impl Package for BitmapPackage {
    fn create_native_modules(&self, config: &BridgeConfig) -> Vec<Arc<dyn NativeModule>> {
        let source = Arc::new(FileImageSource::new(config.resize_filter));
        vec![
            Arc::new(BitmapModule::new(source, config.target_width, config.target_height)) as Arc<dyn NativeModule>,
            Arc::new(PredictorModule::new(config.labels.clone(), config.policy())) as Arc<dyn NativeModule>,
        ]
    }
}

/// The packages every host registers.
pub fn default_packages() -> Vec<Box<dyn Package>> {
    vec![Box::new(BitmapPackage) as Box<dyn Package>]
}
