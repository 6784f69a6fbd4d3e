//! HTTP API models

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use crate::Bpm;

/// Request header carrying a new value on POST
pub const BPM_HEADER: &str = "bpm";

/// Body of a successful POST
pub const POST_ACK: &str = "POST request received";

/// Largest POST body drained before the rest is dropped
pub const MAX_DRAINED_BODY: usize = 64 * 1024;

/// GET response body, written as `{"bpm": <int>}`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpmResponse {
    pub bpm: Bpm,
}

impl BpmResponse {
    /// Body text with the space after the colon that overlays expect
    pub fn to_body(&self) -> String {
        format!("{{\"bpm\": {}}}", self.bpm)
    }
}

impl IntoResponse for BpmResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            self.to_body(),
        )
            .into_response()
    }
}
