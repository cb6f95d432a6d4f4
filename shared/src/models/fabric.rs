//! Fabric composition Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Material id → percentage
pub type Composition = BTreeMap<String, u32>;

/// One row of the composition editor
///
/// `value` is kept as the raw text the user typed. A row without a material
/// key is inert and carries `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricPair {
    #[serde(default)]
    pub key: String,
    #[serde(default = "zero_text")]
    pub value: String,
}

fn zero_text() -> String {
    "0".to_string()
}

impl Default for FabricPair {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: zero_text(),
        }
    }
}

impl FabricPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Fabric content as stored on the product
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FabricContent {
    #[serde(default)]
    pub composition: Composition,
    /// Derived content code, e.g. "COT-60% POL-40%"
    #[serde(default)]
    pub value: String,
}

impl FabricContent {
    /// Sum of the percentages, widened so oversized records cannot overflow
    pub fn total(&self) -> u64 {
        self.composition.values().map(|&v| u64::from(v)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
    }
}

/// Predefined named combination offered for one-shot selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricCombination {
    /// Code of the combination, also its display label
    pub value: String,
    #[serde(default)]
    pub composition: Composition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pair() {
        let pair = FabricPair::default();
        assert!(!pair.has_key());
        assert_eq!(pair.value, "0");
    }

    #[test]
    fn test_content_total() {
        let content: FabricContent = serde_json::from_str(
            r#"{"composition":{"cot":60,"pol":40},"value":"COT-60% POL-40%"}"#,
        )
        .unwrap();
        assert_eq!(content.total(), 100);
        assert!(!content.is_empty());
        assert!(FabricContent::default().is_empty());
    }

    #[test]
    fn test_content_total_widens() {
        let content: FabricContent = serde_json::from_str(
            r#"{"composition":{"cot":4294967295,"pol":4294967295},"value":""}"#,
        )
        .unwrap();
        assert_eq!(content.total(), 8_589_934_590);
    }
}
