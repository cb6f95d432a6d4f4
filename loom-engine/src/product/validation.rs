//! Submit validation for the product form
//!
//! Field errors are collected under the form's error keys and turned into a
//! single [`AppError`] whose details map each key to its message.

use std::collections::BTreeMap;

use shared::error::{AppError, AppResult};
use shared::models::{DraftProduct, ProductMode};

use super::field::{FieldDescriptor, FieldKind, field_config};

// ── Text length limits ──────────────────────────────────────────────

/// Product and article names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: vendor product id, gsm, width, price
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Image paths and picked file uris
pub const MAX_URL_LEN: usize = 2048;

// ── Error keys of the non-descriptor rules ──────────────────────────

pub const CATEGORY_ERROR_KEY: &str = "productCategories";
pub const VARIANT_ERROR_KEY: &str = "variants";
pub const COMPOSITION_ERROR_KEY: &str = "fabricContent";

/// Field-level messages keyed by error key; the first message per key wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.entry(key.into()).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Drop `key` and every `key.row` entry
    pub fn clear_prefix(&mut self, key: &str) {
        self.0
            .retain(|k, _| k != key && !k.strip_prefix(key).is_some_and(|rest| rest.starts_with('.')));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Report messages for indexed rows: the first under `key`, each one
    /// also under `key.row`
    pub fn extend_rows(&mut self, key: &str, rows: Vec<(usize, String)>) {
        for (row, message) in rows {
            self.insert(format!("{key}.{row}"), message.clone());
            self.insert(key, message);
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let summary = match self.0.len() {
            1 => self.0.values().next().cloned().unwrap_or_default(),
            n => format!("{n} fields need attention"),
        };
        Err(self
            .0
            .into_iter()
            .fold(AppError::validation(summary), |err, (k, v)| err.with_detail(k, v)))
    }
}

/// Whether the product has a value for a descriptor, decided by its kind
pub fn has_value(field: &FieldDescriptor, product: &DraftProduct) -> bool {
    match field.kind {
        FieldKind::VendorPicker => !product.vendor_id.trim().is_empty(),
        FieldKind::ImageField => product
            .image
            .as_deref()
            .is_some_and(|uri| !uri.trim().is_empty()),
        FieldKind::CompositionField => !product.fabric_content.value.is_empty(),
        FieldKind::CategoryField => !product.fabric_type.trim().is_empty(),
        FieldKind::VariantField => !product.new_product_variants.is_empty(),
        FieldKind::Checkbox => match field.key {
            "sampleAvailable" => product.sample_available,
            "swatchAvailable" => product.swatch_available,
            _ => false,
        },
        FieldKind::TextField { .. } | FieldKind::Radio { .. } => {
            text_value(product, field.key).is_some_and(|v| !v.trim().is_empty())
        }
    }
}

fn text_value<'a>(product: &'a DraftProduct, key: &str) -> Option<&'a str> {
    let value = match key {
        "vendorProductId" => &product.vendor_product_id,
        "vendorProductName" => &product.vendor_product_name,
        "gsm" => &product.gsm,
        "uom" => &product.uom,
        "width" => &product.width,
        "coneWeight" => &product.cone_weight,
        "price" => &product.price,
        _ => return None,
    };
    Some(value.as_str())
}

/// Required fields that are editable in `mode` must carry a value
pub fn check_required_fields(product: &DraftProduct, mode: ProductMode, errors: &mut FieldErrors) {
    for field in field_config() {
        if field.is_required_in(mode) && !has_value(field, product) {
            errors.insert(field.error_key, format!("{} is required", field.name));
        }
    }
}

/// Length limits on free text
pub fn check_text_lengths(product: &DraftProduct, errors: &mut FieldErrors) {
    let checks: [(&str, &str, &str, usize); 6] = [
        ("vendorProductName", "Vendor Product Name", &product.vendor_product_name, MAX_NAME_LEN),
        ("articleName", "Article Name", &product.article_name, MAX_NAME_LEN),
        ("vendorProductId", "Vendor Product ID", &product.vendor_product_id, MAX_SHORT_TEXT_LEN),
        ("gsm", "GSM", &product.gsm, MAX_SHORT_TEXT_LEN),
        ("width", "Width", &product.width, MAX_SHORT_TEXT_LEN),
        ("price", "Price", &product.price, MAX_SHORT_TEXT_LEN),
    ];
    for (key, name, value, max_len) in checks {
        if value.len() > max_len {
            errors.insert(
                key,
                format!("{name} is too long ({} chars, max {max_len})", value.len()),
            );
        }
    }
    if let Some(uri) = product.image.as_deref()
        && uri.len() > MAX_URL_LEN
    {
        errors.insert("imageFile", format!("Image path is too long ({} chars, max {MAX_URL_LEN})", uri.len()));
    }
}
