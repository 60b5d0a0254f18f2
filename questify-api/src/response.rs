/// Success response envelope
///
/// All successful responses share the shape
/// `{"success": true, "message": ..., "data": ...}`, mirroring the error
/// envelope in the `error` module.

use axum::Json;
use serde::Serialize;

/// Success response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always true
    pub success: bool,

    /// Human-readable status message
    pub message: String,

    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload in the success envelope
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload (e.g. deletions)
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: None,
        })
    }
}
