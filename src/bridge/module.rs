use serde_json::Value;

use crate::bridge::promise::Promise;
use crate::error::BridgeError;

/// A capability exposed to the scripting layer under a fixed name.
///
/// `invoke` answers through `promise` exactly once; implementations should
/// reject rather than panic on bad arguments.
pub trait NativeModule: Send + Sync {
    fn name(&self) -> &'static str;

    fn methods(&self) -> &'static [&'static str];

    fn invoke(&self, method: &str, args: &[Value], promise: Promise);
}

/// Reads positional argument `index` as a string.
pub fn string_arg<'a>(args: &'a [Value], index: usize, what: &str) -> Result<&'a str, BridgeError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| BridgeError::InvalidArgument(format!("argument {index} ({what}) must be a string")))
}

/// Reads positional argument `index` as an array of numbers that fit in an f32.
pub fn number_array_arg(args: &[Value], index: usize, what: &str) -> Result<Vec<f32>, BridgeError> {
    let invalid = || BridgeError::InvalidArgument(format!("argument {index} ({what}) must be an array of numbers"));
    args.get(index)
        .and_then(Value::as_array)
        .ok_or_else(invalid)?
        .iter()
        .map(|v| {
            let f = v.as_f64().ok_or_else(invalid)? as f32;
            if !f.is_finite() {
                return Err(BridgeError::InvalidArgument(format!(
                    "argument {index} ({what}) holds {v}, which is out of f32 range"
                )));
            }
            Ok(f)
        })
        .collect()
}

pub(crate) fn unknown_method(module: &str, method: &str) -> BridgeError {
    BridgeError::UnknownMethod { module: module.to_string(), method: method.to_string() }
}
