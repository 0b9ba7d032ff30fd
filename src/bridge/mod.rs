pub mod bitmap;
pub mod module;
pub mod package;
pub mod predictor;
pub mod promise;
pub mod registry;

pub use bitmap::BitmapModule;
pub use module::NativeModule;
pub use package::{default_packages, BitmapPackage, Package};
pub use predictor::PredictorModule;
pub use promise::{Outcome, PendingResult, Promise, Rejection};
pub use registry::{ModuleDescriptor, ModuleRegistry};
