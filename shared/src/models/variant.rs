//! Variant Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Status given to freshly generated variants
pub const VARIANT_STATUS_ACTIVE: &str = "ACTIVE";

/// Attribute value from the variant catalog
///
/// `name` is the attribute (e.g. "Colour"), `value` the display value
/// (e.g. "Green").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantAttributeValue {
    #[serde(with = "serde_helpers::flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl VariantAttributeValue {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Product variant (one concrete combination of attribute values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Present once the variant has been persisted
    #[serde(
        default,
        with = "serde_helpers::option_flexible_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub variants: Vec<VariantAttributeValue>,
}

fn default_status() -> String {
    VARIANT_STATUS_ACTIVE.to_string()
}

impl ProductVariant {
    /// Fresh, never persisted variant
    pub fn fresh() -> Self {
        Self {
            id: None,
            status: default_status(),
            name: String::new(),
            variants: Vec::new(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Ids of the constituent attribute values, in attribute order
    pub fn value_ids(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.id.as_str()).collect()
    }
}

/// One attribute row of the variant editor: attribute name and chosen value ids
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeSelection {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl AttributeSelection {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// Rows that take part in combination generation
    pub fn is_populated(&self) -> bool {
        !self.key.is_empty() && !self.values.is_empty()
    }
}
