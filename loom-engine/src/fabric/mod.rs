//! Fabric composition
//!
//! Material percentage pairs, their running total and the derived fabric
//! content code.

mod calculator;
pub mod code;

pub use calculator::*;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Fabric composition errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FabricError {
    #[error("Fabric row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Fabric already used in another row: {0}")]
    MaterialInUse(String),

    #[error("Fabric composition already totals {0}%")]
    CompositionFull(u64),

    #[error("Fabric combination not found: {0}")]
    CombinationNotFound(String),

    #[error("Total composition percentage must be {target}% when fabric content is provided (currently {total}%)")]
    CompositionIncomplete { total: u64, target: u32 },
}

pub type FabricResult<T> = Result<T, FabricError>;

impl From<FabricError> for AppError {
    fn from(err: FabricError) -> Self {
        let code = match &err {
            FabricError::RowOutOfRange(_) => ErrorCode::InvalidRequest,
            FabricError::MaterialInUse(_) => ErrorCode::FabricMaterialInUse,
            FabricError::CombinationNotFound(_) => ErrorCode::FabricCombinationNotFound,
            FabricError::CompositionFull(_) | FabricError::CompositionIncomplete { .. } => {
                ErrorCode::FabricCompositionInvalid
            }
        };
        AppError::with_message(code, err.to_string())
    }
}
