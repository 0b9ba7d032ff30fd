use std::io::{Cursor, Read};
use serde::Deserialize;
use serde_json::{json, Value};
use tiny_http::{Request, Response};

use bitmap_bridge::{BridgeError, Rejection};

use crate::routes::{json_response, rejection_response};
use crate::state::SharedState;

/// Largest call body accepted; bitmaps travel as locators, not inline data.
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Body of a module call. A missing or empty body means no arguments.
#[derive(Debug, Default, Deserialize)]
pub struct CallBody {
    #[serde(default)]
    pub args: Vec<Value>,
}

pub fn parse_body(raw: &[u8]) -> Result<CallBody, BridgeError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(CallBody::default());
    }
    serde_json::from_slice(raw)
        .map_err(|e| BridgeError::InvalidArgument(format!("body must be {{\"args\": [...]}}: {e}")))
}

/// Reads at most `limit` bytes, rejecting bodies that go past it.
pub fn read_body<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>, BridgeError> {
    let mut body = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| BridgeError::InvalidArgument(format!("unreadable body: {e}")))?;
    if body.len() > limit {
        return Err(BridgeError::InvalidArgument(format!("body exceeds {limit} bytes")));
    }
    Ok(body)
}

// ---------------------------------------------------------------------------
// POST /modules/{module}/{method}
// ---------------------------------------------------------------------------

pub fn handle_call(
    request: &mut Request,
    module: &str,
    method: &str,
    state: &SharedState,
) -> Response<Cursor<Vec<u8>>> {
    match read_body(request.as_reader(), MAX_BODY_BYTES) {
        Ok(raw) => call_module(&raw, module, method, state),
        Err(e) => rejection_response(&Rejection::from(e)),
    }
}

/// Runs one call against the registry and wraps the outcome for HTTP.
pub fn call_module(raw: &[u8], module: &str, method: &str, state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let body = match parse_body(raw) {
        Ok(b) => b,
        Err(e) => return rejection_response(&Rejection::from(e)),
    };

    let outcome = state
        .registry
        .invoke(module, method, body.args)
        .wait_timeout(state.call_timeout());

    match outcome {
        Ok(result) => json_response(200, &json!({ "result": result })),
        Err(rejection) => {
            log::warn!("{module}.{method} rejected: {rejection}");
            rejection_response(&rejection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use bitmap_bridge::{BridgeConfig, ModuleRegistry, NativeModule, Promise};

    use crate::state::HostState;

    /// Resolves `echo` with its args; `sleep` answers only after half a second.
    struct Lagging;

    impl NativeModule for Lagging {
        fn name(&self) -> &'static str {
            "Lagging"
        }
        fn methods(&self) -> &'static [&'static str] {
            &["echo", "sleep"]
        }
        fn invoke(&self, method: &str, args: &[Value], promise: Promise) {
            if method == "sleep" {
                thread::sleep(Duration::from_millis(500));
            }
            promise.resolve(Value::Array(args.to_vec()));
        }
    }

    fn state(call_timeout_ms: u64) -> SharedState {
        let mut registry = ModuleRegistry::default();
        registry.register(Arc::new(Lagging)).unwrap();
        let config = BridgeConfig { call_timeout_ms, ..BridgeConfig::default() };
        Arc::new(HostState::new(config, registry))
    }

    fn body_json(response: Response<Cursor<Vec<u8>>>) -> Value {
        serde_json::from_slice(&response.into_reader().into_inner()).unwrap()
    }

    #[test]
    fn resolved_call_is_wrapped_in_result() {
        let response = call_module(br#"{"args": [1, "two"]}"#, "Lagging", "echo", &state(5_000));
        assert_eq!(response.status_code().0, 200);
        assert_eq!(body_json(response), json!({ "result": [1, "two"] }));
    }

    #[test]
    fn slow_module_times_out_with_504() {
        let response = call_module(b"", "Lagging", "sleep", &state(1));
        assert_eq!(response.status_code().0, 504);
        assert_eq!(body_json(response)["code"], "E_TIMEOUT");
    }

    #[test]
    fn unknown_module_and_bad_body_map_to_client_errors() {
        let st = state(5_000);
        assert_eq!(call_module(b"", "Nope", "echo", &st).status_code().0, 404);
        assert_eq!(call_module(b"{\"args\": 3}", "Lagging", "echo", &st).status_code().0, 400);
    }

    #[test]
    fn body_limit_is_inclusive() {
        let exact = vec![b' '; 16];
        assert_eq!(read_body(Cursor::new(exact), 16).unwrap().len(), 16);
        let over = vec![b' '; 17];
        let err = read_body(Cursor::new(over), 16).unwrap_err();
        assert_eq!(err.code(), "E_INVALID_ARGUMENT");
    }

    #[test]
    fn empty_body_means_no_args() {
        assert!(parse_body(b"").unwrap().args.is_empty());
        assert!(parse_body(b"  \n").unwrap().args.is_empty());
        assert!(parse_body(b"{}").unwrap().args.is_empty());
    }

    #[test]
    fn args_are_positional() {
        let body = parse_body(br#"{"args": ["file:///tmp/a.png"]}"#).unwrap();
        assert_eq!(body.args, vec![json!("file:///tmp/a.png")]);
    }

    #[test]
    fn malformed_body_is_invalid_argument() {
        let err = parse_body(b"[1, 2").unwrap_err();
        assert_eq!(err.code(), "E_INVALID_ARGUMENT");
    }
}
