//! Category hierarchy selection
//!
//! [`CategoryForest`] indexes the fetched catalog; [`CategoryHierarchyResolver`]
//! owns the product's category rows and multi-select entries.

mod resolver;
mod tree;

pub use resolver::*;
pub use tree::*;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Category row errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Category row {0} has no group selected")]
    NoGroup(usize),

    #[error("Unknown category group: {0}")]
    UnknownGroup(String),

    #[error("Category group already used by another row: {0}")]
    GroupInUse(String),

    #[error("Every category group already has a row")]
    RowLimit,

    #[error("Category group is mandatory: {0}")]
    MandatoryRow(String),

    #[error("Category group cannot be removed: {0}")]
    ProtectedGroup(String),

    #[error("Category not offered at this level: {0}")]
    OptionNotAvailable(String),

    #[error("Category group is not multi-select: {0}")]
    NotMultiSelect(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        let code = match &err {
            CategoryError::RowOutOfRange(_) => ErrorCode::InvalidRequest,
            CategoryError::NoGroup(_) => ErrorCode::CategorySelectionRequired,
            CategoryError::UnknownGroup(_) => ErrorCode::CategoryNotFound,
            CategoryError::GroupInUse(_) => ErrorCode::CategoryGroupInUse,
            CategoryError::RowLimit => ErrorCode::CategoryRowLimit,
            CategoryError::MandatoryRow(_) | CategoryError::ProtectedGroup(_) => {
                ErrorCode::CategoryRowProtected
            }
            CategoryError::OptionNotAvailable(_) | CategoryError::NotMultiSelect(_) => {
                ErrorCode::CategoryOptionInvalid
            }
        };
        AppError::with_message(code, err.to_string())
    }
}
