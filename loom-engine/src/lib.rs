//! Loom Engine - product draft composition
//!
//! # Overview
//!
//! Keeps a vendor's draft product consistent while it is being edited:
//!
//! - **Categories** (`category`): hierarchical category rows drilled level by level
//! - **Fabric** (`fabric`): material percentage pairs and the derived content code
//! - **Variants** (`variant`): cartesian product of attribute values, reconciled
//!   with already persisted variants
//! - **Product form** (`product`): the controller owning the draft and the
//!   three editors, field descriptors and submit validation
//!
//! # Layout
//!
//! ```text
//! loom-engine/src/
//! ├── core/          # configuration
//! ├── category/      # category forest and row resolver
//! ├── fabric/        # composition calculator and code formatting
//! ├── variant/       # attribute catalog, combinations, matching
//! ├── product/       # form controller, fields, validation
//! ├── ports.rs       # catalog lookups implemented by the client
//! ├── notify.rs      # user notices
//! └── utils/         # logging bootstrap
//! ```

pub mod category;
pub mod core;
pub mod fabric;
pub mod notify;
pub mod ports;
pub mod product;
pub mod utils;
pub mod variant;

pub use category::{BackOutcome, CategoryError, CategoryForest, CategoryHierarchyResolver};
pub use core::EngineConfig;
pub use fabric::{FabricCompositionCalculator, FabricError};
pub use notify::{Notice, NoticeBus, NoticeLevel, Notifier, SilentNotifier};
pub use ports::{
    CatalogSources, CategoryCatalog, FabricCombinationCatalog, LookupError, LookupResult, VariantCatalog,
};
pub use product::{FieldDescriptor, FieldKind, ProductForm};
pub use variant::{AttributeCatalog, VariantCombinationEngine, VariantError};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
