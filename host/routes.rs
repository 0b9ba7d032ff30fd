use std::io::Cursor;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use bitmap_bridge::Rejection;

use crate::state::SharedState;
use crate::handlers;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response<T: Serialize>(status: u16, body: &T) -> Response<Cursor<Vec<u8>>> {
    let bytes = match serde_json::to_vec(body) {
        Ok(b) => b,
        Err(e) => {
            log::error!("response serialization failed: {e}");
            return rejection_response(&Rejection::new("E_INTERNAL", e.to_string()));
        }
    };
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

/// Maps a rejection code onto an HTTP status and a `{"code", "message"}` body.
pub fn rejection_response(rejection: &Rejection) -> Response<Cursor<Vec<u8>>> {
    let status = match rejection.code.as_str() {
        "E_INVALID_ARGUMENT" | "E_INVALID_DIMENSIONS" | "E_SOURCE_UNAVAILABLE" => 400,
        "E_UNKNOWN_MODULE" | "E_UNKNOWN_METHOD" => 404,
        "E_CONFIDENCE_TOO_LOW" => 422,
        "E_TIMEOUT" => 504,
        _ => 500,
    };
    let body = serde_json::to_vec(rejection).unwrap_or_default();
    let len = body.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Splits `/modules/{name}/{method}` into its two segments.
pub fn parse_call_path(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("/modules/")?;
    let (module, method) = rest.split_once('/')?;
    if module.is_empty() || method.is_empty() || method.contains('/') {
        return None;
    }
    Some((module, method))
}

/// Dispatches incoming requests to the appropriate handler and responds.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let response = match (&method, path.as_str()) {
        (Method::Get, "/health")  => json_response(200, &serde_json::json!({ "status": "ok" })),
        (Method::Get, "/modules") => handlers::modules::handle_list(&state),
        (Method::Post, p) => match parse_call_path(p) {
            Some((module, call)) => handlers::invoke::handle_call(&mut request, module, call, &state),
            None => not_found(),
        },
        _ => not_found(),
    };

    log::debug!("{:?} {} -> {}", method, path, response.status_code().0);
    let _ = request.respond(response);
}
