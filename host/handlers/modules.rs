use std::io::Cursor;
use tiny_http::Response;

use crate::state::SharedState;

/// `GET /modules`
///
/// Lists every registered module with its callable methods.
pub fn handle_list(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    crate::routes::json_response(200, &state.registry.describe())
}
