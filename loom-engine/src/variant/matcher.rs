//! Reconciliation of generated combinations with persisted variants
//!
//! [`VariantIndex`] is built once from the persisted variants and never
//! changes. Each generation run opens a [`MatchPass`] that remembers which
//! entries it has already handed out, so a persisted variant is reused at
//! most once per run.

use std::collections::{HashMap, HashSet};

use shared::models::ProductVariant;

/// Sorted value ids of a variant
pub type VariantKey = Vec<String>;

fn sorted_key(ids: &[String]) -> VariantKey {
    let mut key = ids.to_vec();
    key.sort();
    key
}

/// Persisted variants keyed by their sorted value ids
#[derive(Debug, Clone, Default)]
pub struct VariantIndex {
    entries: HashMap<VariantKey, ProductVariant>,
}

impl VariantIndex {
    /// Index persisted variants; a later variant with the same value set
    /// replaces an earlier one
    pub fn build(persisted: &[ProductVariant]) -> Self {
        let mut entries = HashMap::with_capacity(persisted.len());
        for variant in persisted {
            let ids: Vec<String> = variant
                .variants
                .iter()
                .filter(|v| !v.id.is_empty())
                .map(|v| v.id.clone())
                .collect();
            if ids.is_empty() {
                continue;
            }
            entries.insert(sorted_key(&ids), variant.clone());
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ids: &[String]) -> Option<&ProductVariant> {
        self.entries.get(&sorted_key(ids))
    }

    pub fn pass(&self) -> MatchPass<'_> {
        MatchPass {
            index: self,
            consumed: HashSet::new(),
        }
    }
}

/// One matching run over an index
#[derive(Debug)]
pub struct MatchPass<'a> {
    index: &'a VariantIndex,
    consumed: HashSet<VariantKey>,
}

impl<'a> MatchPass<'a> {
    /// Claim the persisted variant matching the shortest prefix of
    /// `combination`
    ///
    /// Prefixes of length 1 up to the full combination are tried in turn,
    /// each compared as a sorted id set. Entries already claimed in this pass
    /// are skipped.
    pub fn claim(&mut self, combination: &[String]) -> Option<&'a ProductVariant> {
        let index = self.index;
        for len in 1..=combination.len() {
            let key = sorted_key(&combination[..len]);
            if self.consumed.contains(&key) {
                continue;
            }
            if let Some(variant) = index.entries.get(&key) {
                self.consumed.insert(key);
                return Some(variant);
            }
        }
        None
    }

    pub fn claimed(&self) -> usize {
        self.consumed.len()
    }
}
