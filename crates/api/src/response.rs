//! Success-response envelope.
//!
//! Handlers wrap their payloads in [`DataResponse`] so every 2xx body
//! carries the same `{ "data": ... }` shape and the payload type stays
//! visible in the handler signature instead of hiding in a `json!`.

use serde::Serialize;

/// The `{ "data": T }` wrapper used by all JSON success responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
