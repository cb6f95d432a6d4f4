//! Variant attribute catalog grouped by attribute name

use std::collections::HashMap;

use shared::models::VariantAttributeValue;

/// Attribute values grouped by name, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    groups: Vec<(String, Vec<VariantAttributeValue>)>,
    by_id: HashMap<String, VariantAttributeValue>,
}

impl AttributeCatalog {
    pub fn from_values(values: Vec<VariantAttributeValue>) -> Self {
        let mut groups: Vec<(String, Vec<VariantAttributeValue>)> = Vec::new();
        let mut by_id = HashMap::with_capacity(values.len());
        for value in values {
            by_id.entry(value.id.clone()).or_insert_with(|| value.clone());
            match groups.iter_mut().find(|(name, _)| *name == value.name) {
                Some((_, members)) => members.push(value),
                None => groups.push((value.name.clone(), vec![value])),
            }
        }
        Self { groups, by_id }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct attribute names
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.iter().any(|(n, _)| n == name)
    }

    pub fn values(&self, name: &str) -> &[VariantAttributeValue] {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&VariantAttributeValue> {
        self.by_id.get(id)
    }
}
