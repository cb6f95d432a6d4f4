//! Product form
//!
//! Field descriptors, submit validation and the [`ProductForm`] controller
//! that owns a draft product and its category, fabric and variant editors.

pub mod field;
mod form;
pub mod validation;

pub use field::{FieldDescriptor, FieldKind, field_by_key, field_config, visible_fields};
pub use form::ProductForm;
pub use validation::FieldErrors;
