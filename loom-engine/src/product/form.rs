//! Product form controller
//!
//! [`ProductForm`] owns the draft product together with the three editors
//! that derive parts of it. Callers go through its methods; after every
//! change the derived outputs (`productCategories`, `productCategoriesList`,
//! `fabricContent`, `newProductVariants`) are written back to the draft.

use std::sync::Arc;

use shared::error::{AppError, AppResult};
use shared::models::{DraftProduct, DraftSubmission, ProductMode, UOM_OPTIONS};

use super::field::{FieldDescriptor, field_by_key, visible_fields};
use super::validation::{
    CATEGORY_ERROR_KEY, COMPOSITION_ERROR_KEY, FieldErrors, VARIANT_ERROR_KEY, check_required_fields,
    check_text_lengths,
};
use crate::category::{BackOutcome, CategoryForest, CategoryHierarchyResolver};
use crate::core::EngineConfig;
use crate::fabric::FabricCompositionCalculator;
use crate::notify::{Notice, Notifier};
use crate::ports::{CatalogSources, LookupResult};
use crate::variant::{AttributeCatalog, VariantCombinationEngine};

/// Falls back to an empty list when a catalog cannot be fetched
fn or_empty<T>(result: LookupResult<Vec<T>>, catalog: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        let err = AppError::from(e);
        tracing::warn!(
            catalog,
            code = %err.code,
            domain = %err.code.category(),
            error = %err,
            "Catalog fetch failed, continuing without it"
        );
        Vec::new()
    })
}

pub struct ProductForm {
    product: DraftProduct,
    mode: ProductMode,
    config: EngineConfig,
    sources: CatalogSources,
    notifier: Arc<dyn Notifier>,
    categories: CategoryHierarchyResolver,
    fabric: FabricCompositionCalculator,
    variants: VariantCombinationEngine,
    errors: FieldErrors,
}

impl std::fmt::Debug for ProductForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductForm")
            .field("product", &self.product)
            .field("mode", &self.mode)
            .field("categories", &self.categories)
            .field("fabric", &self.fabric)
            .field("variants", &self.variants)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl ProductForm {
    /// Open a draft for editing
    ///
    /// The category catalog is fetched once and split between the category
    /// editor and the fabric material list. Catalog failures leave the
    /// affected editor empty; loading itself never fails.
    pub async fn load(
        sources: CatalogSources,
        mut draft: DraftProduct,
        mode: ProductMode,
        config: EngineConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        draft.hydrate_form_fields(mode);

        let (catalog, attributes, combinations) = futures::join!(
            sources.categories.fetch_categories(),
            sources.variants.fetch_attributes(),
            sources.combinations.fetch_combinations(),
        );
        let catalog = or_empty(catalog, "categories");
        let attributes = or_empty(attributes, "variants");
        let combinations = or_empty(combinations, "fabric combinations");

        let (forest, material_group) = CategoryForest::split_catalog(catalog, &config.fabric_content_group);
        if material_group.is_none() {
            tracing::warn!(group = %config.fabric_content_group, "Fabric material group missing from catalog");
        }

        let fabric = FabricCompositionCalculator::new(material_group.as_ref(), combinations)
            .with_target_total(config.composition_total)
            .with_content(&draft.fabric_content);

        let categories = CategoryHierarchyResolver::initialize(
            forest,
            config.protected_groups.clone(),
            &draft.product_categories,
            &draft.product_categories_list,
            sources.categories.as_ref(),
        )
        .await;

        let variants = VariantCombinationEngine::new(
            AttributeCatalog::from_values(attributes),
            &draft.product_variants,
            &config,
        )
        .with_article_name(draft.article_name.clone());

        let mut form = Self {
            product: draft,
            mode,
            config,
            sources,
            notifier,
            categories,
            fabric,
            variants,
            errors: FieldErrors::new(),
        };
        form.sync_outputs();

        tracing::info!(
            product_id = form.product.id.as_deref().unwrap_or("-"),
            mode = %mode,
            category_rows = form.categories.rows().len(),
            variants = form.variants.variants().len(),
            "Product form loaded"
        );
        form
    }

    // ========== Accessors ==========

    pub fn product(&self) -> &DraftProduct {
        &self.product
    }

    pub fn mode(&self) -> ProductMode {
        self.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn categories(&self) -> &CategoryHierarchyResolver {
        &self.categories
    }

    pub fn fabric(&self) -> &FabricCompositionCalculator {
        &self.fabric
    }

    pub fn variants(&self) -> &VariantCombinationEngine {
        &self.variants
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    pub fn visible_fields(&self) -> Vec<&'static FieldDescriptor> {
        visible_fields(self.mode)
    }

    pub fn is_editable(&self, key: &str) -> bool {
        field_by_key(key).is_some_and(|f| f.is_editable(self.mode))
    }

    /// Give up the form and keep the draft with its derived outputs
    pub fn into_product(mut self) -> DraftProduct {
        self.sync_outputs();
        self.product
    }

    // ========== Plain fields ==========

    pub fn set_vendor(&mut self, vendor_id: impl Into<String>, username: impl Into<String>) -> AppResult<()> {
        let field = self.editable_field("vendorUsername")?;
        self.product.vendor_id = vendor_id.into();
        self.product.vendor_username = username.into();
        self.errors.remove(field.error_key);
        Ok(())
    }

    /// Set one of the free-text fields by its form key
    pub fn set_text(&mut self, key: &str, value: impl Into<String>) -> AppResult<()> {
        let field = self.editable_field(key)?;
        let value = value.into();
        let slot = match key {
            "vendorProductId" => &mut self.product.vendor_product_id,
            "vendorProductName" => &mut self.product.vendor_product_name,
            "gsm" => &mut self.product.gsm,
            "width" => &mut self.product.width,
            "coneWeight" => &mut self.product.cone_weight,
            "price" => &mut self.product.price,
            _ => return Err(AppError::invalid_request(format!("{} is not a text field", field.name))),
        };
        *slot = value;
        self.errors.remove(field.error_key);
        Ok(())
    }

    pub fn set_uom(&mut self, uom: &str) -> AppResult<()> {
        let field = self.editable_field("uom")?;
        if !UOM_OPTIONS.contains(&uom) {
            return Err(AppError::validation(format!("Unknown unit of measure: {uom}")).with_detail("uom", uom));
        }
        self.product.uom = uom.to_string();
        self.errors.remove(field.error_key);
        Ok(())
    }

    /// Picked image uri, or `None` to drop the image
    pub fn set_image(&mut self, uri: Option<String>) -> AppResult<()> {
        let field = self.editable_field("imageFile")?;
        self.product.image = uri.filter(|u| !u.trim().is_empty());
        self.errors.remove(field.error_key);
        Ok(())
    }

    pub fn set_fabric_type(&mut self, fabric_type: impl Into<String>) -> AppResult<()> {
        let field = self.editable_field("fabricType")?;
        self.product.fabric_type = fabric_type.into();
        self.errors.remove(field.error_key);
        Ok(())
    }

    pub fn set_sample_available(&mut self, available: bool) -> AppResult<()> {
        self.editable_field("sampleAvailable")?;
        self.product.sample_available = available;
        Ok(())
    }

    pub fn set_swatch_available(&mut self, available: bool) -> AppResult<()> {
        self.editable_field("swatchAvailable")?;
        self.product.swatch_available = available;
        Ok(())
    }

    /// Article name; also renames the working variants
    pub fn set_article_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.ensure_writable()?;
        self.product.article_name = name.into();
        self.variants.set_article_name(self.product.article_name.clone());
        self.sync_outputs();
        Ok(())
    }

    // ========== Categories ==========

    pub fn select_category_group(&mut self, row: usize, group: &str) -> AppResult<()> {
        self.ensure_writable()?;
        self.categories.select_group(row, group)?;
        self.after_category_change();
        Ok(())
    }

    pub fn drill_category(&mut self, row: usize, node_id: &str) -> AppResult<()> {
        self.ensure_writable()?;
        self.categories.drill_into(row, node_id)?;
        self.after_category_change();
        Ok(())
    }

    pub async fn category_back(&mut self, row: usize) -> AppResult<BackOutcome> {
        self.ensure_writable()?;
        let outcome = self
            .categories
            .go_back(row, self.sources.categories.as_ref())
            .await?;
        self.after_category_change();
        Ok(outcome)
    }

    pub fn clear_category(&mut self, row: usize) -> AppResult<()> {
        self.ensure_writable()?;
        self.categories.clear_selection(row)?;
        self.after_category_change();
        Ok(())
    }

    pub fn add_category_row(&mut self) -> AppResult<usize> {
        self.ensure_writable()?;
        Ok(self.categories.add_row()?)
    }

    pub fn remove_category_row(&mut self, row: usize) -> AppResult<()> {
        self.ensure_writable()?;
        self.categories.remove_row(row)?;
        self.after_category_change();
        Ok(())
    }

    pub fn set_category_values(&mut self, group: &str, leaf_ids: &[String]) -> AppResult<()> {
        self.ensure_writable()?;
        self.categories.set_multi_select_values(group, leaf_ids)?;
        self.after_category_change();
        Ok(())
    }

    fn after_category_change(&mut self) {
        self.errors.clear_prefix(CATEGORY_ERROR_KEY);
        self.sync_outputs();
    }

    // ========== Fabric composition ==========

    pub async fn set_fabric_key(&mut self, row: usize, key: &str) -> AppResult<()> {
        self.ensure_writable()?;
        self.fabric.set_pair_key(row, key)?;
        self.after_fabric_change().await;
        Ok(())
    }

    /// Returns `false` when the text was ignored (no material, or not a
    /// number)
    pub async fn set_fabric_value(&mut self, row: usize, text: &str) -> AppResult<bool> {
        self.ensure_writable()?;
        let applied = self.fabric.set_pair_value(row, text)?;
        if applied {
            self.after_fabric_change().await;
        }
        Ok(applied)
    }

    pub fn add_fabric_pair(&mut self) -> AppResult<usize> {
        self.ensure_writable()?;
        Ok(self.fabric.add_pair()?)
    }

    pub async fn remove_fabric_pair(&mut self, row: usize) -> AppResult<()> {
        self.ensure_writable()?;
        self.fabric.remove_pair(row)?;
        self.after_fabric_change().await;
        Ok(())
    }

    /// Apply a named combination; an empty code clears the composition
    pub async fn select_fabric_combination(&mut self, code: &str) -> AppResult<()> {
        self.ensure_writable()?;
        self.fabric.select_named_combination(code)?;
        self.after_fabric_change().await;
        Ok(())
    }

    async fn after_fabric_change(&mut self) {
        self.fabric.recompute_code(self.sources.categories.as_ref()).await;
        self.errors.remove(COMPOSITION_ERROR_KEY);
        if let Some(message) = self.fabric.advisory() {
            self.errors.insert(COMPOSITION_ERROR_KEY, message);
        }
        self.sync_outputs();
    }

    // ========== Variants ==========

    pub fn select_variant_attribute(&mut self, row: usize, attribute: &str) -> AppResult<()> {
        self.ensure_writable()?;
        self.variants.select_attribute(row, attribute)?;
        self.after_variant_change();
        Ok(())
    }

    pub fn select_variant_values(&mut self, row: usize, ids: &[String]) -> AppResult<()> {
        self.ensure_writable()?;
        self.variants.select_values(row, ids)?;
        self.after_variant_change();
        Ok(())
    }

    pub fn add_variant_row(&mut self) -> AppResult<usize> {
        self.ensure_writable()?;
        Ok(self.variants.add_attribute_row()?)
    }

    pub fn remove_variant_row(&mut self, row: usize) -> AppResult<()> {
        self.ensure_writable()?;
        self.variants.remove_attribute_row(row)?;
        self.after_variant_change();
        Ok(())
    }

    pub fn remove_variant(&mut self, index: usize) -> AppResult<()> {
        self.ensure_writable()?;
        self.variants.remove_variant(index)?;
        self.after_variant_change();
        Ok(())
    }

    fn after_variant_change(&mut self) {
        self.errors.clear_prefix(VARIANT_ERROR_KEY);
        self.sync_outputs();
    }

    // ========== Submit ==========

    /// Run every submit rule and remember the field messages
    ///
    /// The composition rule always applies. The category and variant rules
    /// apply in modes where those editors are editable.
    pub fn validate(&mut self) -> AppResult<()> {
        self.sync_outputs();

        let mut errors = FieldErrors::new();
        check_required_fields(&self.product, self.mode, &mut errors);
        check_text_lengths(&self.product, &mut errors);
        if let Err(e) = self.fabric.validate_for_submit() {
            errors.insert(COMPOSITION_ERROR_KEY, e.to_string());
        }
        if self.is_editable("fabricType") {
            errors.extend_rows(CATEGORY_ERROR_KEY, self.categories.validate());
        }
        if self.is_editable(VARIANT_ERROR_KEY) {
            errors.extend_rows(VARIANT_ERROR_KEY, self.variants.validate());
        }

        self.errors = errors.clone();
        errors.into_result()
    }

    /// Validated record ready to be posted
    ///
    /// On failure the user is notified and the field messages stay
    /// available through [`ProductForm::errors`].
    pub fn submission(&mut self) -> AppResult<DraftSubmission> {
        if let Err(err) = self.validate() {
            tracing::info!(fields = self.errors.len(), "Product submit blocked by validation");
            self.notifier.notify(Notice::error(err.message.clone()));
            return Err(err);
        }
        Ok(DraftSubmission::from_product(self.product.clone()))
    }

    // ========== Internal ==========

    fn sync_outputs(&mut self) {
        self.product.product_categories = self.categories.product_categories();
        self.product.product_categories_list = self.categories.product_categories_list().to_vec();
        self.product.fabric_content = self.fabric.content().clone();
        self.product.new_product_variants = self.variants.new_product_variants();
    }

    fn ensure_writable(&self) -> AppResult<()> {
        match self.mode {
            ProductMode::Unapproved | ProductMode::View => Err(AppError::invalid_request(format!(
                "Product cannot be edited in {} mode",
                self.mode
            ))),
            _ => Ok(()),
        }
    }

    fn editable_field(&self, key: &str) -> AppResult<&'static FieldDescriptor> {
        let field = field_by_key(key).ok_or_else(|| AppError::invalid_request(format!("Unknown field: {key}")))?;
        if !field.is_editable(self.mode) {
            return Err(AppError::invalid_request(format!(
                "{} cannot be edited in {} mode",
                field.name, self.mode
            )));
        }
        Ok(field)
    }
}
