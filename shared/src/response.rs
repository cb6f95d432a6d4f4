//! API response envelope
//!
//! Every backend answer wraps its payload:
//! ```json
//! { "response": { ... }, "message": "optional text" }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Payload; a missing or null payload is a protocol error for the caller
    pub response: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            response: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Take the payload out of the envelope
    pub fn into_response(self) -> Option<T> {
        self.response
    }
}
