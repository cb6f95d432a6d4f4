//! Loom Client - HTTP access to the product backend
//!
//! [`HttpClient`] talks to the backend's REST API and implements every
//! catalog port of `loom-engine`, so a [`loom_engine::ProductForm`] can be
//! loaded straight from the network:
//!
//! ```ignore
//! let client = Arc::new(ClientConfig::from_env()?.build_http_client()?);
//! let draft = client.load_draft("42").await?;
//! let form = ProductForm::load(CatalogSources::from_single(client.clone()), draft, mode, config, notifier).await;
//! client.submit_draft(&form.submission()?).await?;
//! ```

pub mod cache;
mod catalog;
pub mod config;
pub mod error;
pub mod http;

pub use cache::CachedCategoryLookup;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
