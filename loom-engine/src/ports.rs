//! Collaborator ports
//!
//! Read-only catalog lookups the engine depends on. The HTTP client
//! implements them against the backend; tests use in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::{CategoryNode, FabricCombination, VariantAttributeValue};
use thiserror::Error;

/// Lookup failures reported by a port
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Lookup unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(what) => AppError::not_found(what),
            LookupError::Unavailable(msg) => AppError::with_message(ErrorCode::NetworkError, msg),
            LookupError::Malformed(msg) => AppError::with_message(ErrorCode::InvalidFormat, msg),
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Product category catalog
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    /// All active top-level groups with their nested children
    async fn fetch_categories(&self) -> LookupResult<Vec<CategoryNode>>;

    /// A single category, including its `parent_id`
    async fn fetch_category(&self, id: &str) -> LookupResult<CategoryNode>;
}

/// Variant attribute catalog (flat list, grouped by the engine)
#[async_trait]
pub trait VariantCatalog: Send + Sync {
    async fn fetch_attributes(&self) -> LookupResult<Vec<VariantAttributeValue>>;
}

/// Named fabric combinations offered for one-shot selection
#[async_trait]
pub trait FabricCombinationCatalog: Send + Sync {
    async fn fetch_combinations(&self) -> LookupResult<Vec<FabricCombination>>;
}

/// Bundle of every catalog the product form consumes
#[derive(Clone)]
pub struct CatalogSources {
    pub categories: Arc<dyn CategoryCatalog>,
    pub variants: Arc<dyn VariantCatalog>,
    pub combinations: Arc<dyn FabricCombinationCatalog>,
}

impl CatalogSources {
    pub fn new(
        categories: Arc<dyn CategoryCatalog>,
        variants: Arc<dyn VariantCatalog>,
        combinations: Arc<dyn FabricCombinationCatalog>,
    ) -> Self {
        Self {
            categories,
            variants,
            combinations,
        }
    }

    /// All three ports served by one implementation
    pub fn from_single<T>(source: Arc<T>) -> Self
    where
        T: CategoryCatalog + VariantCatalog + FabricCombinationCatalog + 'static,
    {
        Self {
            categories: source.clone(),
            variants: source.clone(),
            combinations: source,
        }
    }
}

impl std::fmt::Debug for CatalogSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSources")
            .field("categories", &"<dyn CategoryCatalog>")
            .field("variants", &"<dyn VariantCatalog>")
            .field("combinations", &"<dyn FabricCombinationCatalog>")
            .finish()
    }
}
