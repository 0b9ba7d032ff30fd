// One-shot front end: normalizes a single image and prints the float array
// as JSON on stdout. The long-running host lives in host/main.rs.
//
//   cargo run --bin bitmap-bridge -- file:///path/to/fish.jpg

use std::process::ExitCode;

use bitmap_bridge::bridge::{default_packages, BitmapModule};
use bitmap_bridge::{BridgeConfig, ModuleRegistry};
use serde_json::Value;

fn main() -> ExitCode {
    env_logger::init();

    let Some(uri) = std::env::args().nth(1) else {
        eprintln!("usage: bitmap-bridge <image-uri>");
        return ExitCode::from(2);
    };

    let registry = match BridgeConfig::from_env()
        .and_then(|config| ModuleRegistry::from_packages(&default_packages(), &config))
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("bitmap-bridge: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = registry
        .invoke(BitmapModule::NAME, BitmapModule::GET_NORMALIZED_PIXELS, vec![Value::String(uri)])
        .wait();

    match outcome {
        Ok(values) => {
            println!("{values}");
            ExitCode::SUCCESS
        }
        Err(rejection) => {
            eprintln!("bitmap-bridge: {rejection}");
            ExitCode::FAILURE
        }
    }
}
