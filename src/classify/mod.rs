//! Interpretation of classifier scores produced from a normalized buffer.
//!
//! The model itself runs elsewhere; this module only turns its output vector
//! into a labelled prediction and decides whether the result can be accepted
//! outright, needs a human confirmation, or must be rejected.

pub mod policy;
pub mod prediction;

pub use policy::ConfidencePolicy;
pub use prediction::{interpret, Prediction};

/// Class labels in model output order (index `i` names score `i`).
pub const DEFAULT_LABELS: [&str; 5] = [
    "Moorish_Idol",
    "Common_Lionfish",
    "Regal_Angelfish",
    "Blacklip_Butterflyfish",
    "Moon_Wrasse",
];

pub fn default_labels() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
}
