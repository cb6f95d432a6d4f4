//! Product variants
//!
//! Attribute rows, their cartesian product and reconciliation of the
//! generated combinations with already persisted variants.

mod catalog;
pub mod combination;
mod engine;
pub mod matcher;

pub use catalog::AttributeCatalog;
pub use engine::*;
pub use matcher::{MatchPass, VariantIndex};

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VariantError {
    #[error("Attribute row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Attribute row {0} has no attribute selected")]
    NoAttribute(usize),

    #[error("Variant attribute not found: {0}")]
    UnknownAttribute(String),

    #[error("Variant attribute already selected in another row: {0}")]
    AttributeInUse(String),

    #[error("All {0} variant attributes are already selected")]
    RowLimit(usize),

    #[error("Variant attribute {0} is part of saved variants")]
    RowLocked(String),

    #[error("Only one value can be selected for {0}")]
    SingleSelect(String),

    #[error("Variant {0} does not exist")]
    VariantOutOfRange(usize),
}

pub type VariantResult<T> = Result<T, VariantError>;

impl From<VariantError> for AppError {
    fn from(err: VariantError) -> Self {
        let code = match &err {
            VariantError::RowOutOfRange(_) => ErrorCode::InvalidRequest,
            VariantError::NoAttribute(_) => ErrorCode::RequiredField,
            VariantError::UnknownAttribute(_) => ErrorCode::AttributeNotFound,
            VariantError::AttributeInUse(_) => ErrorCode::AttributeInUse,
            VariantError::RowLimit(_) => ErrorCode::AttributeRowLimit,
            VariantError::RowLocked(_) => ErrorCode::AttributeRowLocked,
            VariantError::SingleSelect(_) => ErrorCode::AttributeSingleSelect,
            VariantError::VariantOutOfRange(_) => ErrorCode::VariantNotFound,
        };
        AppError::with_message(code, err.to_string())
    }
}
