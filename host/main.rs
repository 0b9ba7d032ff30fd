/// bitmap-bridge host
///
/// Exposes the registered native modules to an out-of-process scripting layer
/// over HTTP. Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin bridge-host --release
///
/// Endpoints:
///   GET  /modules                 : registered modules and their methods
///   POST /modules/{name}/{method} : body `{"args": [...]}`
///   GET  /health

mod handlers;
mod routes;
mod state;

use std::process::ExitCode;
use std::sync::Arc;
use tiny_http::Server;

use bitmap_bridge::bridge::default_packages;
use bitmap_bridge::{BridgeConfig, ModuleRegistry};
use state::HostState;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match BridgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let registry = match ModuleRegistry::from_packages(&default_packages(), &config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("module registration failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::http(config.listen_addr.as_str()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("cannot bind {}: {e}", config.listen_addr);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "bridge host listening on http://{} ({} modules, target {}x{})",
        config.listen_addr,
        registry.len(),
        config.target_width,
        config.target_height
    );

    let shared_state = Arc::new(HostState::new(config, registry));

    // One thread per request so a slow decode does not stall other callers.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }

    ExitCode::SUCCESS
}
