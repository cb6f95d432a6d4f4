//! Draft Product Model

use serde::{Deserialize, Serialize};

use super::category::{CategoryAssignment, ProductCategoryEntry};
use super::fabric::FabricContent;
use super::serde_helpers;
use super::variant::ProductVariant;

/// Unit-of-measure choices offered by the product form
pub const UOM_OPTIONS: [&str; 3] = ["Kg", "Meter", "Yard"];

/// Lifecycle stage the product form is opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductMode {
    #[default]
    New,
    InProgress,
    Unapproved,
    View,
}

impl ProductMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductMode::New => "new",
            ProductMode::InProgress => "in_progress",
            ProductMode::Unapproved => "unapproved",
            ProductMode::View => "view",
        }
    }
}

impl std::fmt::Display for ProductMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical metrics block of a stored product
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub weight: String,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub width: String,
}

/// Unit-of-measure flags as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOfMeasures {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_roll: bool,
    #[serde(default)]
    pub is_kg: bool,
    #[serde(default)]
    pub is_meter: bool,
    #[serde(default)]
    pub is_yard: bool,
}

impl UnitOfMeasures {
    pub fn from_uom(uom: &str) -> Self {
        Self {
            is_roll: false,
            is_kg: uom == "Kg",
            is_meter: uom == "Meter",
            is_yard: uom == "Yard",
        }
    }

    /// Form value for these flags; anything unflagged reads as "Yard"
    pub fn to_uom(&self) -> &'static str {
        if self.is_roll {
            "Roll"
        } else if self.is_kg {
            "Kg"
        } else if self.is_meter {
            "Meter"
        } else {
            "Yard"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherInformation {
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub cone_weight: String,
    #[serde(default)]
    pub unit_of_measures: UnitOfMeasures,
}

/// Draft product record, as fetched from and submitted to the backend
///
/// The form works on the flat fields (`gsm`, `width`, `uom`, `coneWeight`);
/// the backend stores them inside `metrics` and `otherInformation`, which are
/// read here and only written back through [`DraftSubmission`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftProduct {
    #[serde(
        default,
        with = "serde_helpers::option_flexible_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub vendor_id: String,
    #[serde(default)]
    pub vendor_username: String,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub vendor_product_id: String,
    #[serde(default)]
    pub vendor_product_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub article_name: String,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub gsm: String,
    #[serde(default)]
    pub uom: String,
    /// Stored image path, or a locally picked file uri before upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub width: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub fabric_content: FabricContent,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub fabric_type: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub sample_available: bool,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub swatch_available: bool,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub cone_weight: String,
    #[serde(default, with = "serde_helpers::flexible_text")]
    pub price: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub product_categories: Vec<CategoryAssignment>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub product_categories_list: Vec<ProductCategoryEntry>,
    /// Persisted variants, the reconciliation source
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub product_variants: Vec<ProductVariant>,
    /// Working set of variants produced by the editor
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub new_product_variants: Vec<ProductVariant>,

    #[serde(default, skip_serializing)]
    pub metrics: Option<Metrics>,
    #[serde(default, skip_serializing)]
    pub other_information: Option<OtherInformation>,
}

impl DraftProduct {
    /// Copy the nested backend blocks into the flat form fields.
    ///
    /// Flat values already present win; `uom` always follows the stored
    /// unit flags when they exist.
    pub fn hydrate_form_fields(&mut self, mode: ProductMode) {
        if self.status.is_none() {
            self.status = Some(mode.as_str().to_string());
        }
        if let Some(metrics) = &self.metrics {
            if self.gsm.is_empty() {
                self.gsm = metrics.weight.clone();
            }
            if self.width.is_empty() {
                self.width = metrics.width.clone();
            }
        }
        if let Some(other) = &self.other_information {
            if self.cone_weight.is_empty() {
                self.cone_weight = other.cone_weight.clone();
            }
            self.uom = other.unit_of_measures.to_uom().to_string();
        }
    }
}

/// Submitted form of a draft: the record plus its derived nested blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSubmission {
    #[serde(flatten)]
    pub product: DraftProduct,
    pub metrics: Metrics,
    pub other_information: OtherInformation,
}

impl DraftSubmission {
    pub fn from_product(product: DraftProduct) -> Self {
        let metrics = Metrics {
            weight: product.gsm.clone(),
            width: product.width.clone(),
        };
        let other_information = OtherInformation {
            cone_weight: product.cone_weight.clone(),
            unit_of_measures: UnitOfMeasures::from_uom(&product.uom),
        };
        Self {
            product,
            metrics,
            other_information,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(serde_json::to_value(ProductMode::InProgress).unwrap(), "in_progress");
        let mode: ProductMode = serde_json::from_str(r#""unapproved""#).unwrap();
        assert_eq!(mode, ProductMode::Unapproved);
        assert_eq!(ProductMode::default(), ProductMode::New);
    }

    #[test]
    fn test_hydrate_from_backend_record() {
        let json = r#"{
            "id": 12,
            "vendorId": 3,
            "vendorProductId": "VP-1",
            "metrics": {"weight": 180, "width": "58"},
            "otherInformation": {"coneWeight": 2.5, "unitOfMeasures": {"isKg": false, "isMeter": true}},
            "fabricContent": {"composition": {"c1": 60, "c2": 40}, "value": "COT-60% POL-40%"},
            "productCategories": null
        }"#;
        let mut product: DraftProduct = serde_json::from_str(json).unwrap();
        product.hydrate_form_fields(ProductMode::InProgress);

        assert_eq!(product.id.as_deref(), Some("12"));
        assert_eq!(product.vendor_id, "3");
        assert_eq!(product.gsm, "180");
        assert_eq!(product.width, "58");
        assert_eq!(product.cone_weight, "2.5");
        assert_eq!(product.uom, "Meter");
        assert_eq!(product.status.as_deref(), Some("in_progress"));
        assert_eq!(product.fabric_content.total(), 100);
        assert!(product.product_categories.is_empty());
    }

    #[test]
    fn test_unflagged_uom_reads_as_yard() {
        assert_eq!(UnitOfMeasures::default().to_uom(), "Yard");
        let roll = UnitOfMeasures {
            is_roll: true,
            ..Default::default()
        };
        assert_eq!(roll.to_uom(), "Roll");
    }

    #[test]
    fn test_submission_adds_nested_blocks() {
        let product = DraftProduct {
            gsm: "180".into(),
            width: "58".into(),
            uom: "Kg".into(),
            cone_weight: "2".into(),
            metrics: Some(Metrics::default()),
            ..Default::default()
        };
        let json = serde_json::to_value(DraftSubmission::from_product(product)).unwrap();
        assert_eq!(json["metrics"]["weight"], "180");
        assert_eq!(json["metrics"]["width"], "58");
        assert_eq!(json["otherInformation"]["coneWeight"], "2");
        assert_eq!(json["otherInformation"]["unitOfMeasures"]["isKg"], true);
        assert_eq!(json["otherInformation"]["unitOfMeasures"]["isYard"], false);
        assert!(json["otherInformation"]["unitOfMeasures"].get("isRoll").is_none());
        assert_eq!(json["gsm"], "180");
        assert!(json.get("id").is_none());
    }
}
