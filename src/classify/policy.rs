use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Confidence tiers for a top-1 prediction.
///
/// - `>= accept` : accepted without asking
/// - `>= confirm`: returned, but the caller should ask the user to confirm
/// - below       : rejected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    pub accept: f32,
    pub confirm: f32,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        ConfidencePolicy { accept: 0.9, confirm: 0.6 }
    }
}

impl ConfidencePolicy {
    pub fn new(accept: f32, confirm: f32) -> Result<Self, BridgeError> {
        let policy = ConfidencePolicy { accept, confirm };
        policy.validate()?;
        Ok(policy)
    }

    /// Requires `0 <= confirm <= accept <= 1`.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if !(0.0..=1.0).contains(&self.accept) || !(0.0..=1.0).contains(&self.confirm) {
            return Err(BridgeError::Config(format!(
                "thresholds must lie in [0, 1] (accept={}, confirm={})",
                self.accept, self.confirm
            )));
        }
        if self.confirm > self.accept {
            return Err(BridgeError::Config(format!(
                "confirm threshold {} exceeds accept threshold {}",
                self.confirm, self.accept
            )));
        }
        Ok(())
    }
}
