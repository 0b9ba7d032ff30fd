use serde::{Deserialize, Serialize};

use crate::classify::{default_labels, ConfidencePolicy};
use crate::error::BridgeError;
use crate::source::ResizeFilter;

/// Bridge configuration.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "listen_addr": "0.0.0.0:7878", "resize_filter": "lanczos3" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub listen_addr: String,
    pub target_width: u32,
    pub target_height: u32,
    pub resize_filter: ResizeFilter,
    pub accept_threshold: f32,
    pub confirm_threshold: f32,
    /// Class labels in model output order.
    pub labels: Vec<String>,
    /// Upper bound a host waits for one module call.
    pub call_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let policy = ConfidencePolicy::default();
        BridgeConfig {
            listen_addr: "127.0.0.1:7878".to_string(),
            target_width: 224,
            target_height: 224,
            resize_filter: ResizeFilter::default(),
            accept_threshold: policy.accept,
            confirm_threshold: policy.confirm,
            labels: default_labels(),
            call_timeout_ms: 30_000,
        }
    }
}

impl BridgeConfig {
    /// Deserializes a config from a JSON file; missing keys take defaults.
    pub fn load_json(path: &str) -> Result<BridgeConfig, BridgeError> {
        let file = std::fs::File::open(path)
            .map_err(|e| BridgeError::Config(format!("cannot open {path}: {e}")))?;
        let reader = std::io::BufReader::new(file);
        let config: BridgeConfig = serde_json::from_reader(reader)
            .map_err(|e| BridgeError::Config(format!("{path}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// `BRIDGE_CONFIG` names an optional JSON file, `BRIDGE_ADDR` overrides
    /// the listen address.
    pub fn from_env() -> Result<BridgeConfig, BridgeError> {
        let mut config = match std::env::var("BRIDGE_CONFIG") {
            Ok(path) if !path.is_empty() => BridgeConfig::load_json(&path)?,
            _ => BridgeConfig::default(),
        };
        if let Ok(addr) = std::env::var("BRIDGE_ADDR") {
            if !addr.is_empty() {
                config.listen_addr = addr;
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(BridgeError::Config(format!(
                "target resolution must be positive, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        if self.call_timeout_ms == 0 {
            return Err(BridgeError::Config("call_timeout_ms must be positive".into()));
        }
        if self.labels.is_empty() {
            return Err(BridgeError::Config("at least one class label is required".into()));
        }
        self.policy().validate()
    }

    pub fn policy(&self) -> ConfidencePolicy {
        ConfidencePolicy { accept: self.accept_threshold, confirm: self.confirm_threshold }
    }
}
