//! Client error types

use loom_engine::LookupError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for LookupError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(what) => LookupError::NotFound(what),
            ClientError::InvalidResponse(msg) => LookupError::Malformed(msg),
            ClientError::Serialization(e) => LookupError::Malformed(e.to_string()),
            other => LookupError::Unavailable(other.to_string()),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized => AppError::not_authenticated(),
            ClientError::Forbidden(msg) => AppError::permission_denied(msg),
            ClientError::NotFound(what) => AppError::not_found(what),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Http(e) if e.is_timeout() => AppError::with_message(ErrorCode::TimeoutError, e.to_string()),
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::InvalidResponse(msg) => AppError::with_message(ErrorCode::InvalidFormat, msg),
            ClientError::Serialization(e) => AppError::with_message(ErrorCode::InvalidFormat, e.to_string()),
            ClientError::Internal(msg) => AppError::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_mapping() {
        assert_eq!(
            LookupError::from(ClientError::NotFound("category 9".into())),
            LookupError::NotFound("category 9".into())
        );
        assert!(matches!(
            LookupError::from(ClientError::InvalidResponse("missing response".into())),
            LookupError::Malformed(_)
        ));
        assert!(matches!(LookupError::from(ClientError::Unauthorized), LookupError::Unavailable(_)));
    }

    #[test]
    fn test_app_error_codes() {
        assert_eq!(AppError::from(ClientError::Unauthorized).code, ErrorCode::NotAuthenticated);
        assert_eq!(AppError::from(ClientError::Forbidden("agents only".into())).code, ErrorCode::PermissionDenied);
        assert_eq!(AppError::from(ClientError::Validation("bad uom".into())).code, ErrorCode::ValidationFailed);
        assert_eq!(AppError::from(ClientError::Internal("boom".into())).code, ErrorCode::InternalError);
    }
}
