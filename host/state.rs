use std::sync::Arc;
use std::time::Duration;

use bitmap_bridge::{BridgeConfig, ModuleRegistry};

/// Read-only state shared by every request thread.
pub struct HostState {
    pub config: BridgeConfig,
    pub registry: ModuleRegistry,
}

impl HostState {
    pub fn new(config: BridgeConfig, registry: ModuleRegistry) -> Self {
        HostState { config, registry }
    }

    /// How long a request waits for its module before answering `E_TIMEOUT`.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.config.call_timeout_ms)
    }
}

/// Shared state type: an `Arc<HostState>` passed to every handler.
pub type SharedState = Arc<HostState>;
