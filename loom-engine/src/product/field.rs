//! Field descriptors of the product form
//!
//! Each field is described once: its kind, whether it is required, the modes
//! it is editable in and the modes it is shown read-only in. Rendering and
//! validation dispatch on [`FieldKind`] with `match`.

use serde::Serialize;
use shared::models::{ProductMode, UOM_OPTIONS};

/// What kind of input a field is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    VendorPicker,
    TextField { numeric: bool },
    Radio { options: &'static [&'static str] },
    ImageField,
    CompositionField,
    CategoryField,
    Checkbox,
    VariantField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: u8,
    /// Display name, also used in "is required" messages
    pub name: &'static str,
    /// Product attribute the field edits
    pub key: &'static str,
    /// Key error messages are reported under
    pub error_key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
    pub editable_when: &'static [ProductMode],
    pub viewable_in: &'static [ProductMode],
}

impl FieldDescriptor {
    /// Editable in `mode`; nothing is editable in the review modes
    pub fn is_editable(&self, mode: ProductMode) -> bool {
        !matches!(mode, ProductMode::Unapproved | ProductMode::View) && self.editable_when.contains(&mode)
    }

    pub fn is_visible(&self, mode: ProductMode) -> bool {
        use ProductMode::*;
        match mode {
            New => self.editable_when.contains(&New),
            InProgress => self.editable_when.contains(&InProgress) || self.viewable_in.contains(&InProgress),
            Unapproved => {
                self.viewable_in.contains(&Unapproved)
                    && (self.editable_when.contains(&New) || self.editable_when.contains(&InProgress))
            }
            View => false,
        }
    }

    /// Required at submit in `mode`
    pub fn is_required_in(&self, mode: ProductMode) -> bool {
        self.required && self.editable_when.contains(&mode)
    }
}

const NEW_ONLY: &[ProductMode] = &[ProductMode::New];
const IN_PROGRESS_ONLY: &[ProductMode] = &[ProductMode::InProgress];
const AFTER_CREATION: &[ProductMode] = &[ProductMode::View, ProductMode::InProgress, ProductMode::Unapproved];
const IN_REVIEW: &[ProductMode] = &[ProductMode::Unapproved];

#[allow(clippy::too_many_arguments)]
const fn field(
    id: u8,
    name: &'static str,
    key: &'static str,
    kind: FieldKind,
    required: bool,
    placeholder: Option<&'static str>,
    editable_when: &'static [ProductMode],
    viewable_in: &'static [ProductMode],
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        key,
        error_key: key,
        kind,
        required,
        placeholder,
        editable_when,
        viewable_in,
    }
}

const TEXT: FieldKind = FieldKind::TextField { numeric: false };
const NUMBER: FieldKind = FieldKind::TextField { numeric: true };

static FIELDS: [FieldDescriptor; 14] = [
    FieldDescriptor {
        error_key: "vendorId",
        ..field(1, "Vendor", "vendorUsername", FieldKind::VendorPicker, true, Some("Select Vendor"), NEW_ONLY, AFTER_CREATION)
    },
    field(2, "Vendor Product ID", "vendorProductId", TEXT, true, Some("Enter Vendor Product ID"), NEW_ONLY, AFTER_CREATION),
    field(3, "Vendor Product Name", "vendorProductName", TEXT, true, Some("Enter product name"), NEW_ONLY, AFTER_CREATION),
    field(4, "GSM", "gsm", NUMBER, false, Some("Enter GSM"), NEW_ONLY, AFTER_CREATION),
    field(5, "UOM", "uom", FieldKind::Radio { options: &UOM_OPTIONS }, true, Some("Select UOM"), NEW_ONLY, AFTER_CREATION),
    field(6, "Image", "imageFile", FieldKind::ImageField, true, Some("Upload or Select Image"), NEW_ONLY, AFTER_CREATION),
    field(7, "Width", "width", NUMBER, false, Some("Enter Width"), IN_PROGRESS_ONLY, IN_REVIEW),
    field(8, "Composition", "fabricContent", FieldKind::CompositionField, false, Some("Select or Add Fabric Combination"), IN_PROGRESS_ONLY, IN_REVIEW),
    field(9, "Fabric Type", "fabricType", FieldKind::CategoryField, false, Some("Select Fabric Type"), IN_PROGRESS_ONLY, IN_REVIEW),
    field(10, "Variants", "variants", FieldKind::VariantField, false, Some("Select Variants"), IN_PROGRESS_ONLY, IN_REVIEW),
    field(11, "Sample Available", "sampleAvailable", FieldKind::Checkbox, false, None, IN_PROGRESS_ONLY, IN_REVIEW),
    field(12, "Swatch Available", "swatchAvailable", FieldKind::Checkbox, false, None, IN_PROGRESS_ONLY, IN_REVIEW),
    field(13, "Cone Weight", "coneWeight", NUMBER, false, Some("Enter Cone Weight"), IN_PROGRESS_ONLY, IN_REVIEW),
    field(14, "Price", "price", NUMBER, false, Some("Enter Price"), IN_PROGRESS_ONLY, IN_REVIEW),
];

/// All product form fields, in display order
pub fn field_config() -> &'static [FieldDescriptor] {
    &FIELDS
}

pub fn field_by_key(key: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Fields shown in `mode`
pub fn visible_fields(mode: ProductMode) -> Vec<&'static FieldDescriptor> {
    FIELDS.iter().filter(|f| f.is_visible(mode)).collect()
}
