use thiserror::Error;

/// Every failure the bridge can report back to a caller.
///
/// Each variant maps to one stable rejection code (see [`BridgeError::code`])
/// so the scripting side can branch on the code instead of parsing messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// The image locator could not be opened or decoded.
    #[error("image source unavailable: {0}")]
    SourceUnavailable(String),

    /// The pixel grid does not hold exactly `width * height` pixels.
    #[error("invalid dimensions: target {width}x{height} needs {expected} pixels, grid has {actual}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        expected: u64,
        actual: usize,
    },

    /// The best classifier score fell below the confirmation threshold.
    #[error("confidence too low: {0:.2}")]
    ConfidenceTooLow(f32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error("module {module} has no method {method}")]
    UnknownMethod { module: String, method: String },

    #[error("duplicate module name: {0}")]
    DuplicateModule(String),

    #[error("config error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Stable machine-readable code used in rejections.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::SourceUnavailable(_)      => "E_SOURCE_UNAVAILABLE",
            BridgeError::InvalidDimensions { .. }  => "E_INVALID_DIMENSIONS",
            BridgeError::ConfidenceTooLow(_)       => "E_CONFIDENCE_TOO_LOW",
            BridgeError::InvalidArgument(_)        => "E_INVALID_ARGUMENT",
            BridgeError::UnknownModule(_)          => "E_UNKNOWN_MODULE",
            BridgeError::UnknownMethod { .. }      => "E_UNKNOWN_METHOD",
            BridgeError::DuplicateModule(_)        => "E_DUPLICATE_MODULE",
            BridgeError::Config(_)                 => "E_CONFIG",
        }
    }
}
