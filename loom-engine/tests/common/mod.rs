//! In-memory catalogs shared by the integration suites

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use loom_engine::{CatalogSources, CategoryCatalog, FabricCombinationCatalog, LookupError, LookupResult, VariantCatalog};
use shared::models::{CategoryNode, Composition, FabricCombination, VariantAttributeValue};

pub fn node(id: &str, name: &str, parent: Option<&str>, child: Vec<CategoryNode>) -> CategoryNode {
    CategoryNode {
        id: id.into(),
        name: name.into(),
        parent_id: parent.map(String::from),
        child,
        ..Default::default()
    }
}

/// Fabric Type (mandatory) → Woven → {Denim, Twill}, Knit
pub fn fabric_type() -> CategoryNode {
    CategoryNode {
        is_mandatory: true,
        ..node(
            "g-type",
            "Fabric Type",
            None,
            vec![
                node(
                    "woven",
                    "Woven",
                    Some("g-type"),
                    vec![
                        node("denim", "Denim", Some("woven"), vec![]),
                        node("twill", "Twill", Some("woven"), vec![]),
                    ],
                ),
                node("knit", "Knit", Some("g-type"), vec![]),
            ],
        )
    }
}

pub fn occasion() -> CategoryNode {
    CategoryNode {
        multi_select: true,
        ..node(
            "g-occasion",
            "Occasion",
            None,
            vec![
                node("casual", "Casual", Some("g-occasion"), vec![]),
                node("formal", "Formal", Some("g-occasion"), vec![]),
            ],
        )
    }
}

/// The material group feeding the fabric calculator
pub fn fabric_content() -> CategoryNode {
    node(
        "g-content",
        "Fabric Content",
        None,
        vec![
            node("cot", "Cotton", Some("g-content"), vec![]),
            node("pol", "Polyester", Some("g-content"), vec![]),
            node("vis", "Viscose", Some("g-content"), vec![]),
        ],
    )
}

pub fn category_catalog() -> Vec<CategoryNode> {
    vec![fabric_type(), occasion(), fabric_content()]
}

pub fn attribute_catalog() -> Vec<VariantAttributeValue> {
    vec![
        VariantAttributeValue::new("red", "Colour", "Red"),
        VariantAttributeValue::new("blue", "Colour", "Blue"),
        VariantAttributeValue::new("s", "Size", "S"),
        VariantAttributeValue::new("m", "Size", "M"),
        VariantAttributeValue::new("solid", "Solid / Pattern", "Solid"),
        VariantAttributeValue::new("stripe", "Solid / Pattern", "Stripe"),
    ]
}

pub fn combination_catalog() -> Vec<FabricCombination> {
    vec![FabricCombination {
        value: "COT-60% POL-40%".into(),
        composition: Composition::from([("cot".to_string(), 60), ("pol".to_string(), 40)]),
    }]
}

/// Serves every port from memory; can be switched offline
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    pub categories: Vec<CategoryNode>,
    pub attributes: Vec<VariantAttributeValue>,
    pub combinations: Vec<FabricCombination>,
    pub offline: AtomicBool,
    pub category_lookups: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn seeded() -> Self {
        Self {
            categories: category_catalog(),
            attributes: attribute_catalog(),
            combinations: combination_catalog(),
            ..Default::default()
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.category_lookups.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> LookupResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("catalog offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryCatalog for InMemoryCatalog {
    async fn fetch_categories(&self) -> LookupResult<Vec<CategoryNode>> {
        self.check_online()?;
        Ok(self.categories.clone())
    }

    async fn fetch_category(&self, id: &str) -> LookupResult<CategoryNode> {
        self.category_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.categories
            .iter()
            .find_map(|g| g.find(id))
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("category {id}")))
    }
}

#[async_trait]
impl VariantCatalog for InMemoryCatalog {
    async fn fetch_attributes(&self) -> LookupResult<Vec<VariantAttributeValue>> {
        self.check_online()?;
        Ok(self.attributes.clone())
    }
}

#[async_trait]
impl FabricCombinationCatalog for InMemoryCatalog {
    async fn fetch_combinations(&self) -> LookupResult<Vec<FabricCombination>> {
        self.check_online()?;
        Ok(self.combinations.clone())
    }
}

pub fn sources(catalog: &Arc<InMemoryCatalog>) -> CatalogSources {
    CatalogSources::from_single(catalog.clone())
}

pub fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
