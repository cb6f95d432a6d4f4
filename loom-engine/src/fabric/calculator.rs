//! Fabric composition editor state

use std::collections::HashMap;

use futures::future::try_join_all;
use shared::models::{CategoryNode, Composition, FabricCombination, FabricContent, FabricPair};

use super::code::{format_token, order_by_code, parse_percent, percent_or_zero, TOKEN_SEPARATOR};
use super::{FabricError, FabricResult};
use crate::ports::CategoryCatalog;

/// Advisory message while the composition is over the target
pub const OVER_TOTAL_MESSAGE: &str = "Total fabric content cannot exceed 100%";

/// Ordered material pairs, their running total and the derived content code
///
/// `total_percent` is maintained incrementally: it always equals the sum of
/// the composition, i.e. the parsed values of pairs that have a material.
/// It is kept as `u64` so any number of `u32` percentages sums exactly.
/// Pair mutations leave the code stale; [`recompute_code`] refreshes it,
/// except that dropping the last populated pair clears it immediately.
///
/// [`recompute_code`]: FabricCompositionCalculator::recompute_code
#[derive(Debug, Clone)]
pub struct FabricCompositionCalculator {
    pairs: Vec<FabricPair>,
    total_percent: u64,
    content: FabricContent,
    target_total: u32,
    combinations: Vec<FabricCombination>,
    materials: Vec<CategoryNode>,
    key_to_name: HashMap<String, String>,
}

impl FabricCompositionCalculator {
    /// Empty editor with a single blank pair
    ///
    /// `material_group` is the category tree listing fabric materials; its
    /// leaves become the selectable keys.
    pub fn new(material_group: Option<&CategoryNode>, combinations: Vec<FabricCombination>) -> Self {
        let materials: Vec<CategoryNode> = material_group
            .map(|g| g.leaves().into_iter().cloned().collect())
            .unwrap_or_default();
        let key_to_name = materials
            .iter()
            .map(|m| (m.id.clone(), m.name.clone()))
            .collect();
        Self {
            pairs: vec![FabricPair::default()],
            total_percent: 0,
            content: FabricContent::default(),
            target_total: 100,
            combinations,
            materials,
            key_to_name,
        }
    }

    pub fn with_target_total(mut self, target: u32) -> Self {
        self.target_total = target;
        self
    }

    /// Seed the editor from persisted content
    ///
    /// Pairs follow the order of the persisted code; the code itself is kept.
    pub fn with_content(mut self, content: &FabricContent) -> Self {
        if content.is_empty() {
            self.content = FabricContent {
                composition: Composition::new(),
                value: content.value.clone(),
            };
            return self;
        }
        self.pairs = order_by_code(&content.composition, &content.value)
            .into_iter()
            .map(|(key, pct)| FabricPair::new(key, pct.to_string()))
            .collect();
        self.total_percent = content.total();
        self.content = content.clone();
        self
    }

    pub fn pairs(&self) -> &[FabricPair] {
        &self.pairs
    }

    pub fn total_percent(&self) -> u64 {
        self.total_percent
    }

    pub fn content(&self) -> &FabricContent {
        &self.content
    }

    pub fn composition(&self) -> &Composition {
        &self.content.composition
    }

    pub fn code(&self) -> &str {
        &self.content.value
    }

    pub fn combinations(&self) -> &[FabricCombination] {
        &self.combinations
    }

    pub fn material_name(&self, key: &str) -> Option<&str> {
        self.key_to_name.get(key).map(String::as_str)
    }

    /// Materials selectable for a pair: all not used by another pair
    pub fn available_keys(&self, index: usize) -> Vec<&CategoryNode> {
        self.materials
            .iter()
            .filter(|m| {
                !self
                    .pairs
                    .iter()
                    .enumerate()
                    .any(|(i, p)| i != index && p.key == m.id)
            })
            .collect()
    }

    fn pair_mut(&mut self, index: usize) -> FabricResult<&mut FabricPair> {
        self.pairs
            .get_mut(index)
            .ok_or(FabricError::RowOutOfRange(index))
    }

    /// Point a pair at another material (or none)
    ///
    /// The typed percentage stays; only its attribution moves. Clearing the
    /// key resets the text to `"0"`.
    pub fn set_pair_key(&mut self, index: usize, key: &str) -> FabricResult<()> {
        if !key.is_empty()
            && self
                .pairs
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && p.key == key)
        {
            return Err(FabricError::MaterialInUse(key.to_string()));
        }

        let pair = self.pair_mut(index)?;
        let old_key = std::mem::replace(&mut pair.key, key.to_string());
        let old_value = contribution(&old_key, &pair.value);
        if key.is_empty() {
            pair.value = "0".to_string();
        }
        let new_value = contribution(key, &pair.value);

        self.total_percent = self.total_percent - u64::from(old_value) + u64::from(new_value);
        if !old_key.is_empty() && old_key != key {
            self.content.composition.remove(&old_key);
        }
        if !key.is_empty() {
            self.content.composition.insert(key.to_string(), new_value);
        }
        tracing::debug!(row = index, material = %key, total = self.total_percent, "Fabric pair key set");
        self.clear_code_if_unpopulated();
        Ok(())
    }

    /// Update a pair's percentage text
    ///
    /// Non-empty text that does not start with a digit is ignored and
    /// `Ok(false)` is returned. A pair without a material keeps the text but
    /// contributes nothing.
    pub fn set_pair_value(&mut self, index: usize, text: &str) -> FabricResult<bool> {
        if !text.is_empty() && parse_percent(text).is_none() {
            // Guard the row index even for ignored input
            self.pair_mut(index)?;
            return Ok(false);
        }

        let pair = self.pair_mut(index)?;
        let old_value = contribution(&pair.key, &pair.value);
        pair.value = text.to_string();
        let new_value = contribution(&pair.key, &pair.value);
        let key = pair.key.clone();

        self.total_percent = self.total_percent - u64::from(old_value) + u64::from(new_value);
        if !key.is_empty() {
            self.content.composition.insert(key, new_value);
        }
        self.clear_code_if_unpopulated();
        Ok(true)
    }

    /// Append a blank pair while the total is below the target
    pub fn add_pair(&mut self) -> FabricResult<usize> {
        if self.total_percent >= u64::from(self.target_total) {
            return Err(FabricError::CompositionFull(self.total_percent));
        }
        self.pairs.push(FabricPair::default());
        Ok(self.pairs.len() - 1)
    }

    pub fn remove_pair(&mut self, index: usize) -> FabricResult<FabricPair> {
        if index >= self.pairs.len() {
            return Err(FabricError::RowOutOfRange(index));
        }
        let removed = self.pairs.remove(index);
        self.total_percent -= u64::from(contribution(&removed.key, &removed.value));
        if removed.has_key() {
            self.content.composition.remove(&removed.key);
        }
        self.clear_code_if_unpopulated();
        Ok(removed)
    }

    /// Replace everything with a named combination
    ///
    /// An empty code clears the editor. Pairs follow the order of the
    /// combination's own code.
    pub fn select_named_combination(&mut self, code: &str) -> FabricResult<()> {
        if code.is_empty() {
            self.pairs.clear();
            self.total_percent = 0;
            self.content = FabricContent::default();
            return Ok(());
        }

        let combination = self
            .combinations
            .iter()
            .find(|c| c.value == code)
            .ok_or_else(|| FabricError::CombinationNotFound(code.to_string()))?;

        self.pairs = order_by_code(&combination.composition, &combination.value)
            .into_iter()
            .map(|(key, pct)| FabricPair::new(key, pct.to_string()))
            .collect();
        self.content = FabricContent {
            composition: combination.composition.clone(),
            value: combination.value.clone(),
        };
        self.total_percent = self.content.total();
        tracing::debug!(code = %code, total = self.total_percent, "Fabric combination selected");
        Ok(())
    }

    /// Rebuild the content code from the populated pairs
    ///
    /// Names come from the material tree first, then from `lookup`. If any
    /// lookup fails the previous code is kept and `false` is returned.
    pub async fn recompute_code(&mut self, lookup: &dyn CategoryCatalog) -> bool {
        let populated: Vec<(String, u32)> = self
            .pairs
            .iter()
            .filter(|p| is_populated(p))
            .map(|p| (p.key.clone(), percent_or_zero(&p.value)))
            .collect();

        if populated.is_empty() {
            self.content.value.clear();
            return true;
        }

        let key_to_name = &self.key_to_name;
        let names = populated.iter().map(|(key, _)| async move {
            match key_to_name.get(key) {
                Some(name) => Ok(name.clone()),
                None => lookup.fetch_category(key).await.map(|node| node.name),
            }
        });
        let resolved = try_join_all(names).await;

        match resolved {
            Ok(names) => {
                let code = names
                    .iter()
                    .zip(&populated)
                    .map(|(name, (_, pct))| format_token(name, *pct))
                    .collect::<Vec<_>>()
                    .join(TOKEN_SEPARATOR);
                tracing::debug!(code = %code, "Fabric content code computed");
                self.content.value = code;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Material name lookup failed, keeping previous code");
                false
            }
        }
    }

    /// Advisory message while the total exceeds the target
    pub fn advisory(&self) -> Option<String> {
        (self.total_percent > u64::from(self.target_total)).then(|| {
            if self.target_total == 100 {
                OVER_TOTAL_MESSAGE.to_string()
            } else {
                format!("Total fabric content cannot exceed {}%", self.target_total)
            }
        })
    }

    /// Submit rule: a non-empty composition must hit the target exactly
    pub fn validate_for_submit(&self) -> FabricResult<()> {
        if !self.content.composition.is_empty() && self.total_percent != u64::from(self.target_total) {
            return Err(FabricError::CompositionIncomplete {
                total: self.total_percent,
                target: self.target_total,
            });
        }
        Ok(())
    }

    fn clear_code_if_unpopulated(&mut self) {
        if !self.pairs.iter().any(is_populated) {
            self.content.value.clear();
        }
    }
}

fn is_populated(pair: &FabricPair) -> bool {
    pair.has_key() && !pair.value.is_empty()
}

/// What a pair adds to the total: nothing without a material
fn contribution(key: &str, value: &str) -> u32 {
    if key.is_empty() {
        0
    } else {
        percent_or_zero(value)
    }
}
