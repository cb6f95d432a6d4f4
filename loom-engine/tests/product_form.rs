//! ProductForm load, edit and submit flows against in-memory catalogs

mod common;

use std::sync::Arc;

use common::{InMemoryCatalog, ids, sources};
use loom_engine::{EngineConfig, ErrorCode, NoticeBus, NoticeLevel, ProductForm, SilentNotifier};
use shared::models::{DraftProduct, ProductMode};

fn persisted_draft() -> DraftProduct {
    serde_json::from_str(
        r#"{
            "id": 501,
            "vendorId": 3,
            "vendorUsername": "acme",
            "vendorProductId": "VP-9",
            "vendorProductName": "Indigo denim",
            "articleName": "Indigo",
            "metrics": {"weight": 320, "width": 58},
            "otherInformation": {"coneWeight": "", "unitOfMeasures": {"isKg": false, "isMeter": true, "isYard": false}},
            "image": "drafts/501.jpg",
            "fabricContent": {"composition": {"cot": 40, "pol": 60}, "value": "POL-60% COT-40%"},
            "productCategories": [{
                "key": "Fabric Type",
                "value": {"id": "denim", "name": "Denim", "parentId": "woven"},
                "heirarchyLabel": "Woven / Denim",
                "multiSelect": false,
                "isMandatory": true
            }],
            "productCategoriesList": [
                {"id": "casual", "name": "Casual", "parentId": "g-occasion", "productGroupName": "Occasion"}
            ],
            "productVariants": [{
                "id": 9001,
                "status": "ACTIVE",
                "name": "Indigo / Red / S",
                "variants": [
                    {"id": "red", "name": "Colour", "value": "Red"},
                    {"id": "s", "name": "Size", "value": "S"}
                ]
            }]
        }"#,
    )
    .unwrap()
}

async fn open(catalog: &Arc<InMemoryCatalog>, draft: DraftProduct, mode: ProductMode) -> ProductForm {
    ProductForm::load(
        sources(catalog),
        draft,
        mode,
        EngineConfig::defaults(),
        Arc::new(SilentNotifier),
    )
    .await
}

#[tokio::test]
async fn test_new_product_submits_creation_fields() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let mut form = open(&catalog, DraftProduct::default(), ProductMode::New).await;

    assert_eq!(form.visible_fields().len(), 6);
    form.set_vendor("3", "acme").unwrap();
    form.set_text("vendorProductId", "VP-1").unwrap();
    form.set_text("vendorProductName", "Slub jersey").unwrap();
    form.set_text("gsm", "180").unwrap();
    form.set_uom("Kg").unwrap();
    form.set_image(Some("file:///picked/jersey.jpg".into())).unwrap();

    // Later-stage fields are locked while creating
    let err = form.set_text("price", "12").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRequest);

    let submission = form.submission().unwrap();
    let json = serde_json::to_value(&submission).unwrap();
    assert_eq!(json["status"], "new");
    assert_eq!(json["metrics"]["weight"], "180");
    assert_eq!(json["otherInformation"]["unitOfMeasures"]["isKg"], true);
    assert_eq!(json["vendorProductName"], "Slub jersey");
    assert!(json.get("id").is_none());
}

#[tokio::test]
async fn test_new_product_missing_fields_are_reported() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let bus = NoticeBus::new();
    let mut notices = bus.subscribe();
    let mut form = ProductForm::load(
        sources(&catalog),
        DraftProduct::default(),
        ProductMode::New,
        EngineConfig::defaults(),
        Arc::new(bus.clone()),
    )
    .await;

    let err = form.submission().unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(err.detail_str("vendorId"), Some("Vendor is required"));
    assert_eq!(err.detail_str("imageFile"), Some("Image is required"));
    assert_eq!(form.field_error("uom"), Some("UOM is required"));

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, err.message);

    // Editing a field clears its message
    form.set_uom("Yard").unwrap();
    assert_eq!(form.field_error("uom"), None);
}

#[tokio::test]
async fn test_persisted_draft_is_restored() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let form = open(&catalog, persisted_draft(), ProductMode::InProgress).await;

    let product = form.product();
    assert_eq!(product.gsm, "320");
    assert_eq!(product.width, "58");
    assert_eq!(product.uom, "Meter");

    let fabric_row = form.categories().row(0).unwrap();
    assert_eq!(fabric_row.key, "Fabric Type");
    assert_eq!(fabric_row.hierarchy_label, "Woven / Denim");
    assert_eq!(fabric_row.count, 3);
    assert!(form.categories().rows().iter().any(|r| r.key == "Occasion" && r.multi_select));

    let keys: Vec<&str> = form.fabric().pairs().iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["pol", "cot"]);
    assert_eq!(form.fabric().code(), "POL-60% COT-40%");

    let variants = form.variants().variants();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].id.as_deref(), Some("9001"));
    assert_eq!(variants[0].name, "Indigo / Red / S");
}

#[tokio::test]
async fn test_in_progress_edits_flow_into_submission() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let mut form = open(&catalog, persisted_draft(), ProductMode::InProgress).await;

    form.select_variant_values(0, &ids(&["red", "blue"])).unwrap();
    form.set_fabric_value(1, "30").await.unwrap();
    form.set_fabric_key(0, "vis").await.unwrap();
    assert_eq!(form.fabric().total_percent(), 90);
    form.add_fabric_pair().unwrap();
    form.set_fabric_key(2, "pol").await.unwrap();
    form.set_fabric_value(2, "10").await.unwrap();
    assert_eq!(form.fabric().code(), "VIS-60% COT-30% POL-10%");

    form.set_text("price", "7.5").unwrap();
    form.set_sample_available(true).unwrap();

    let submission = form.submission().unwrap();
    let json = serde_json::to_value(&submission).unwrap();
    assert_eq!(json["id"], "501");
    assert_eq!(json["fabricContent"]["value"], "VIS-60% COT-30% POL-10%");
    assert_eq!(json["fabricContent"]["composition"]["vis"], 60);
    assert_eq!(json["price"], "7.5");
    assert_eq!(json["sampleAvailable"], true);

    let variants = json["newProductVariants"].as_array().unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0]["id"], "9001");
    assert_eq!(variants[1]["name"], "Indigo / Blue / S");
    assert!(variants[1].get("id").is_none());

    let categories = json["productCategories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["heirarchyLabel"], "Woven / Denim");
    assert!(categories[0].get("options").is_none());
    assert_eq!(json["productCategoriesList"][0]["productGroupName"], "Occasion");
}

#[tokio::test]
async fn test_incomplete_composition_blocks_submit() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let mut form = open(&catalog, persisted_draft(), ProductMode::InProgress).await;

    form.remove_fabric_pair(0).await.unwrap();
    assert_eq!(form.fabric().code(), "COT-40%");

    let err = form.submission().unwrap_err();
    assert_eq!(
        err.detail_str("fabricContent"),
        Some("Total composition percentage must be 100% when fabric content is provided (currently 40%)")
    );

    form.select_fabric_combination("").await.unwrap();
    assert!(form.submission().is_ok());
}

#[tokio::test]
async fn test_unfinished_rows_block_submit() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let mut form = open(&catalog, persisted_draft(), ProductMode::InProgress).await;

    let occasion = form
        .categories()
        .rows()
        .iter()
        .position(|r| r.key == "Occasion")
        .unwrap();
    form.set_category_values("Occasion", &[]).unwrap();
    let row = form.add_variant_row().unwrap();
    form.select_variant_attribute(row, "Solid / Pattern").unwrap();

    let err = form.submission().unwrap_err();
    assert_eq!(err.detail_str(&format!("productCategories.{occasion}")), Some("Select a Occasion category"));
    assert_eq!(err.detail_str("variants.2"), Some("Select at least one value for Solid / Pattern"));

    form.set_category_values("Occasion", &ids(&["formal"])).unwrap();
    form.select_variant_values(row, &ids(&["solid"])).unwrap();
    assert!(form.submission().is_ok());
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn test_offline_catalogs_degrade_to_empty_editors() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    catalog.set_offline(true);
    let form = open(&catalog, persisted_draft(), ProductMode::InProgress).await;

    // Persisted labels and variants survive without the catalogs
    let row = form.categories().row(0).unwrap();
    assert_eq!(row.hierarchy_label, "Woven / Denim");
    assert_eq!(form.variants().variants().len(), 1);
    assert!(form.variants().catalog().is_empty());
    assert!(form.fabric().combinations().is_empty());
    assert_eq!(form.fabric().code(), "POL-60% COT-40%");
}

#[tokio::test]
async fn test_review_modes_are_read_only() {
    let catalog = Arc::new(InMemoryCatalog::seeded());
    let mut form = open(&catalog, persisted_draft(), ProductMode::Unapproved).await;

    assert_eq!(form.visible_fields().len(), 14);
    assert!(form.set_text("price", "1").is_err());
    assert!(form.select_variant_values(0, &ids(&["blue"])).is_err());
    assert!(form.set_fabric_value(0, "10").await.is_err());
    assert_eq!(form.product().new_product_variants.len(), 1);
}
