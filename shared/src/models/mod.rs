//! Data models
//!
//! Wire shapes of the product backend. Field names follow its camelCase JSON;
//! ids are kept as strings whether the backend sends numbers or text.

pub mod category;
pub mod fabric;
pub mod product;
pub mod serde_helpers;
pub mod variant;
pub mod vendor;

// Re-exports
pub use category::*;
pub use fabric::*;
pub use product::*;
pub use variant::*;
pub use vendor::*;
