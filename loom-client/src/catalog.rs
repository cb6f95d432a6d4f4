//! Catalog ports served over HTTP

use async_trait::async_trait;
use loom_engine::{CategoryCatalog, FabricCombinationCatalog, LookupResult, VariantCatalog};
use shared::models::{CategoryNode, FabricCombination, VariantAttributeValue};

use crate::HttpClient;

#[async_trait]
impl CategoryCatalog for HttpClient {
    async fn fetch_categories(&self) -> LookupResult<Vec<CategoryNode>> {
        Ok(self.categories().await?)
    }

    async fn fetch_category(&self, id: &str) -> LookupResult<CategoryNode> {
        Ok(self.category(id).await?)
    }
}

#[async_trait]
impl VariantCatalog for HttpClient {
    async fn fetch_attributes(&self) -> LookupResult<Vec<VariantAttributeValue>> {
        Ok(self.variant_attributes().await?)
    }
}

#[async_trait]
impl FabricCombinationCatalog for HttpClient {
    async fn fetch_combinations(&self) -> LookupResult<Vec<FabricCombination>> {
        Ok(self.fabric_combinations().await?)
    }
}
