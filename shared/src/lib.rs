//! Shared types for Loom
//!
//! Wire models of the product backend, the API response envelope and the
//! unified error system used by the engine and the client.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiEnvelope;
pub use serde::{Deserialize, Serialize};
