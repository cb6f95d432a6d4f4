//! Vendor Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// The part of a vendor record the product form shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    #[serde(with = "serde_helpers::flexible_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}
