//! Variant combination engine
//!
//! Owns the attribute rows of the variant editor and the working set of
//! variants derived from them. Every change to the rows regenerates the
//! working set: the cartesian product of the populated rows, with persisted
//! variants claimed back through a [`MatchPass`](super::MatchPass) so their ids and status
//! survive the edit.

use std::collections::{HashMap, HashSet};

use shared::models::{AttributeSelection, ProductVariant, VARIANT_STATUS_ACTIVE, VariantAttributeValue};

use super::catalog::AttributeCatalog;
use super::combination::cartesian_product;
use super::matcher::VariantIndex;
use super::{VariantError, VariantResult};
use crate::core::EngineConfig;

#[derive(Debug, Clone)]
pub struct VariantCombinationEngine {
    catalog: AttributeCatalog,
    selections: Vec<AttributeSelection>,
    index: VariantIndex,
    /// attribute name → value ids found in persisted variants
    persisted_values: HashMap<String, HashSet<String>>,
    /// attribute names that appear in persisted variants
    locked: HashSet<String>,
    variants: Vec<ProductVariant>,
    article_name: String,
    default_product_name: String,
    single_select_attribute: String,
}

impl VariantCombinationEngine {
    /// Build the engine from the catalog and the persisted variants
    ///
    /// Attribute rows are reconstructed from the persisted variants in order
    /// of first appearance, leaving out the single-select attribute. The
    /// working set starts as the persisted list and is regenerated right
    /// away when a catalog is available.
    pub fn new(catalog: AttributeCatalog, persisted: &[ProductVariant], config: &EngineConfig) -> Self {
        let mut selections: Vec<AttributeSelection> = Vec::new();
        let mut persisted_values: HashMap<String, HashSet<String>> = HashMap::new();
        let mut locked = HashSet::new();

        for value in persisted.iter().flat_map(|v| v.variants.iter()) {
            if value.name.is_empty() || value.id.is_empty() {
                continue;
            }
            locked.insert(value.name.clone());
            persisted_values
                .entry(value.name.clone())
                .or_default()
                .insert(value.id.clone());
            if value.name == config.single_select_attribute {
                continue;
            }
            match selections.iter_mut().find(|s| s.key == value.name) {
                Some(row) => {
                    if !row.values.contains(&value.id) {
                        row.values.push(value.id.clone());
                    }
                }
                None => selections.push(AttributeSelection::new(
                    value.name.clone(),
                    vec![value.id.clone()],
                )),
            }
        }
        if selections.is_empty() {
            selections.push(AttributeSelection::default());
        }

        let mut engine = Self {
            catalog,
            selections,
            index: VariantIndex::build(persisted),
            persisted_values,
            locked,
            variants: persisted.to_vec(),
            article_name: String::new(),
            default_product_name: config.default_product_name.clone(),
            single_select_attribute: config.single_select_attribute.clone(),
        };
        engine.regenerate();
        engine
    }

    /// Set the article name used as the prefix of variant names
    pub fn with_article_name(mut self, name: impl Into<String>) -> Self {
        self.set_article_name(name);
        self
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn selections(&self) -> &[AttributeSelection] {
        &self.selections
    }

    /// Current working set, submitted as `newProductVariants`
    pub fn variants(&self) -> &[ProductVariant] {
        &self.variants
    }

    pub fn new_product_variants(&self) -> Vec<ProductVariant> {
        self.variants.clone()
    }

    pub fn index(&self) -> &VariantIndex {
        &self.index
    }

    pub fn is_locked(&self, row: usize) -> bool {
        self.selections
            .get(row)
            .is_some_and(|s| self.locked.contains(&s.key))
    }

    pub fn is_single_select(&self, attribute: &str) -> bool {
        attribute == self.single_select_attribute
    }

    /// Attribute names row `row` may switch to: its own plus any not used
    /// by another row
    pub fn available_attributes(&self, row: usize) -> Vec<&str> {
        self.catalog
            .names()
            .filter(|name| {
                !self
                    .selections
                    .iter()
                    .enumerate()
                    .any(|(i, s)| i != row && s.key == *name)
            })
            .collect()
    }

    pub fn available_values(&self, row: usize) -> &[VariantAttributeValue] {
        match self.selections.get(row) {
            Some(s) => self.catalog.values(&s.key),
            None => &[],
        }
    }

    pub fn set_article_name(&mut self, name: impl Into<String>) {
        self.article_name = name.into();
        for variant in &mut self.variants {
            variant.name = variant_name(&self.article_name, &self.default_product_name, &variant.variants);
        }
    }

    pub fn select_attribute(&mut self, row: usize, attribute: &str) -> VariantResult<()> {
        let current = self
            .selections
            .get(row)
            .ok_or(VariantError::RowOutOfRange(row))?;
        if current.key == attribute {
            return Ok(());
        }
        if self.locked.contains(&current.key) {
            return Err(VariantError::RowLocked(current.key.clone()));
        }
        if !attribute.is_empty() {
            if !self.catalog.contains(attribute) {
                return Err(VariantError::UnknownAttribute(attribute.to_string()));
            }
            if self.selections.iter().any(|s| s.key == attribute) {
                return Err(VariantError::AttributeInUse(attribute.to_string()));
            }
        }

        tracing::debug!(row, attribute, "Variant attribute selected");
        self.selections[row] = AttributeSelection::new(attribute, Vec::new());
        self.regenerate();
        Ok(())
    }

    /// Replace the chosen values of a row
    ///
    /// Ids that do not belong to the row's attribute are dropped, as are
    /// repeats. The single-select attribute takes at most one value.
    pub fn select_values(&mut self, row: usize, ids: &[String]) -> VariantResult<()> {
        let selection = self
            .selections
            .get(row)
            .ok_or(VariantError::RowOutOfRange(row))?;
        if selection.key.is_empty() {
            return Err(VariantError::NoAttribute(row));
        }

        let mut values: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            let belongs = self
                .catalog
                .get(id)
                .is_some_and(|v| v.name == selection.key);
            if belongs && !values.contains(id) {
                values.push(id.clone());
            }
        }
        if self.is_single_select(&selection.key) && values.len() > 1 {
            return Err(VariantError::SingleSelect(selection.key.clone()));
        }

        tracing::debug!(row, count = values.len(), "Variant values selected");
        self.selections[row].values = values;
        self.regenerate();
        Ok(())
    }

    /// Append a blank row; bounded by the number of distinct attributes
    pub fn add_attribute_row(&mut self) -> VariantResult<usize> {
        if self.selections.len() >= self.catalog.len() {
            return Err(VariantError::RowLimit(self.catalog.len()));
        }
        self.selections.push(AttributeSelection::default());
        Ok(self.selections.len() - 1)
    }

    pub fn remove_attribute_row(&mut self, row: usize) -> VariantResult<AttributeSelection> {
        let selection = self
            .selections
            .get(row)
            .ok_or(VariantError::RowOutOfRange(row))?;
        if self.locked.contains(&selection.key) {
            return Err(VariantError::RowLocked(selection.key.clone()));
        }

        let removed = self.selections.remove(row);
        tracing::debug!(row, attribute = %removed.key, "Variant attribute row removed");
        self.regenerate();
        Ok(removed)
    }

    /// Drop one variant from the working set
    ///
    /// Values no longer used by any remaining variant are pruned from the
    /// rows unless they come from persisted variants; rows left without
    /// values disappear unless their attribute is persisted. The working set
    /// is not regenerated, so the removed combination stays removed.
    pub fn remove_variant(&mut self, index: usize) -> VariantResult<ProductVariant> {
        if index >= self.variants.len() {
            return Err(VariantError::VariantOutOfRange(index));
        }
        let removed = self.variants.remove(index);

        let mut used: HashMap<&str, HashSet<&str>> = HashMap::new();
        for value in self.variants.iter().flat_map(|v| v.variants.iter()) {
            used.entry(value.name.as_str())
                .or_default()
                .insert(value.id.as_str());
        }

        let mut pruned = Vec::with_capacity(self.selections.len());
        for selection in &self.selections {
            if selection.key.is_empty() {
                continue;
            }
            let values: Vec<String> = selection
                .values
                .iter()
                .filter(|id| {
                    used.get(selection.key.as_str())
                        .is_some_and(|ids| ids.contains(id.as_str()))
                        || self
                            .persisted_values
                            .get(&selection.key)
                            .is_some_and(|ids| ids.contains(*id))
                })
                .cloned()
                .collect();
            if !values.is_empty() || self.locked.contains(&selection.key) {
                pruned.push(AttributeSelection::new(selection.key.clone(), values));
            }
        }
        if pruned.is_empty() {
            pruned.push(AttributeSelection::default());
        }
        self.selections = pruned;

        tracing::debug!(index, name = %removed.name, "Variant removed");
        Ok(removed)
    }

    /// Rebuild the working set from the populated rows
    ///
    /// Without a catalog nothing can be resolved and the working set is
    /// left alone.
    pub fn regenerate(&mut self) {
        if self.catalog.is_empty() {
            return;
        }

        let lists: Vec<Vec<String>> = self
            .selections
            .iter()
            .filter(|s| s.is_populated())
            .map(|s| s.values.clone())
            .collect();

        let mut pass = self.index.pass();
        let mut generated = Vec::new();
        for combination in cartesian_product(&lists) {
            let claimed = pass.claim(&combination);
            let values: Vec<VariantAttributeValue> = combination
                .iter()
                .filter_map(|id| self.catalog.get(id).cloned())
                .collect();
            if values.is_empty() {
                continue;
            }

            let mut variant = claimed.cloned().unwrap_or_else(ProductVariant::fresh);
            if !variant.is_persisted() {
                variant.status = VARIANT_STATUS_ACTIVE.to_string();
            }
            variant.name = variant_name(&self.article_name, &self.default_product_name, &values);
            variant.variants = values;
            generated.push(variant);
        }

        tracing::debug!(
            variants = generated.len(),
            reused = pass.claimed(),
            "Variants regenerated"
        );
        self.variants = generated;
    }

    /// Rows with an attribute but no values
    pub fn validate(&self) -> Vec<(usize, String)> {
        self.selections
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.key.is_empty() && s.values.is_empty())
            .map(|(i, s)| (i, format!("Select at least one value for {}", s.key)))
            .collect()
    }
}

fn variant_name(article_name: &str, default_name: &str, values: &[VariantAttributeValue]) -> String {
    let base = if article_name.trim().is_empty() {
        default_name
    } else {
        article_name
    };
    std::iter::once(base)
        .chain(values.iter().map(|v| v.value.as_str()).filter(|v| !v.is_empty()))
        .collect::<Vec<_>>()
        .join(" / ")
}
