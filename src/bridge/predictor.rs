use serde_json::Value;

use crate::bridge::module::{number_array_arg, unknown_method, NativeModule};
use crate::bridge::promise::Promise;
use crate::classify::{interpret, ConfidencePolicy};
use crate::error::BridgeError;

/// Turns a raw classifier output vector into a labelled prediction.
pub struct PredictorModule {
    labels: Vec<String>,
    policy: ConfidencePolicy,
}

impl PredictorModule {
    pub const NAME: &'static str = "PredictorModule";
    pub const INTERPRET_SCORES: &'static str = "interpretScores";

    pub fn new(labels: Vec<String>, policy: ConfidencePolicy) -> Self {
        PredictorModule { labels, policy }
    }

    fn interpret_scores(&self, args: &[Value]) -> Result<Value, BridgeError> {
        let scores = number_array_arg(args, 0, "scores")?;
        let prediction = interpret(&scores, &self.labels, &self.policy)?;
        serde_json::to_value(prediction)
            .map_err(|e| BridgeError::InvalidArgument(format!("unserializable prediction: {e}")))
    }
}

impl NativeModule for PredictorModule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn methods(&self) -> &'static [&'static str] {
        &[Self::INTERPRET_SCORES]
    }

    fn invoke(&self, method: &str, args: &[Value], promise: Promise) {
        let result = match method {
            Self::INTERPRET_SCORES => self.interpret_scores(args),
            _ => Err(unknown_method(Self::NAME, method)),
        };
        promise.complete(result);
    }
}
