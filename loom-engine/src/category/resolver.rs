//! Category row state machine
//!
//! Each row picks a category group and then drills level by level until a
//! leaf is chosen. `count` is the depth currently offered: level 2 holds the
//! group's direct children. A finalized row carries `count - 1` label
//! segments, a row still drilling carries `count - 2`.

use std::collections::{BTreeMap, HashSet};

use shared::models::{CategoryAssignment, CategoryNode, HIERARCHY_SEPARATOR, ProductCategoryEntry};

use super::tree::CategoryForest;
use super::{CategoryError, CategoryResult};
use crate::ports::{CategoryCatalog, LookupError, LookupResult};

/// Upper bound on ancestor walks; deeper chains are treated as malformed
const MAX_ANCESTOR_DEPTH: usize = 32;

/// Result of [`CategoryHierarchyResolver::go_back`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Moved one level up
    Moved,
    /// Returned to the group's top level
    Reset,
    /// Parent lookup failed; nothing changed
    Unchanged,
}

/// Hierarchical category selection for one product
#[derive(Debug, Clone)]
pub struct CategoryHierarchyResolver {
    forest: CategoryForest,
    rows: Vec<CategoryAssignment>,
    list: Vec<ProductCategoryEntry>,
    protected_groups: Vec<String>,
    row_errors: BTreeMap<usize, String>,
}

impl CategoryHierarchyResolver {
    /// Fresh state: one row per mandatory group, or a single blank row
    pub fn new(forest: CategoryForest, protected_groups: Vec<String>) -> Self {
        let mut resolver = Self {
            forest,
            rows: Vec::new(),
            list: Vec::new(),
            protected_groups,
            row_errors: BTreeMap::new(),
        };
        resolver.complete_rows();
        resolver
    }

    /// Rebuild state from a persisted product
    ///
    /// Each finalized row gets its label rebuilt by walking the leaf's
    /// ancestors through `lookup`; if the walk fails the persisted label is
    /// kept. Multi-select groups found in `list` get a row, missing mandatory
    /// groups are added and mandatory rows sort first.
    pub async fn initialize(
        forest: CategoryForest,
        protected_groups: Vec<String>,
        persisted_rows: &[CategoryAssignment],
        persisted_list: &[ProductCategoryEntry],
        lookup: &dyn CategoryCatalog,
    ) -> Self {
        let mut rows = Vec::with_capacity(persisted_rows.len());
        for persisted in persisted_rows {
            rows.push(restore_row(&forest, persisted, lookup).await);
        }

        let mut seen: HashSet<String> = rows.iter().map(|r| r.key.clone()).collect();
        for entry in persisted_list {
            let group = entry.product_group_name.as_str();
            if !seen.insert(group.to_string()) {
                continue;
            }
            let row = match forest.group(group) {
                Some(g) => CategoryAssignment::for_group(g),
                None => CategoryAssignment {
                    key: group.to_string(),
                    multi_select: true,
                    ..Default::default()
                },
            };
            rows.push(row);
        }

        let mut resolver = Self {
            forest,
            rows,
            list: persisted_list.to_vec(),
            protected_groups,
            row_errors: BTreeMap::new(),
        };
        resolver.complete_rows();
        tracing::debug!(
            rows = resolver.rows.len(),
            entries = resolver.list.len(),
            "Category rows restored"
        );
        resolver
    }

    /// Add rows for missing mandatory groups, order mandatory rows first and
    /// never leave the editor without a row
    fn complete_rows(&mut self) {
        let missing: Vec<CategoryAssignment> = self
            .forest
            .mandatory_groups()
            .filter(|g| !self.rows.iter().any(|r| r.key == g.name))
            .map(CategoryAssignment::for_group)
            .collect();
        self.rows.extend(missing);
        self.rows.sort_by_key(|r| !r.is_mandatory);
        if self.rows.is_empty() {
            self.rows.push(CategoryAssignment::default());
        }
    }

    pub fn forest(&self) -> &CategoryForest {
        &self.forest
    }

    pub fn rows(&self) -> &[CategoryAssignment] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&CategoryAssignment> {
        self.rows.get(index)
    }

    fn row_mut(&mut self, index: usize) -> CategoryResult<&mut CategoryAssignment> {
        self.rows
            .get_mut(index)
            .ok_or(CategoryError::RowOutOfRange(index))
    }

    fn keyed_row_mut(&mut self, index: usize) -> CategoryResult<&mut CategoryAssignment> {
        let row = self.row_mut(index)?;
        if row.key.is_empty() {
            return Err(CategoryError::NoGroup(index));
        }
        Ok(row)
    }

    /// Groups selectable for a row: every group not used by another row
    pub fn available_groups(&self, index: usize) -> Vec<&str> {
        self.forest
            .group_names()
            .filter(|name| {
                !self
                    .rows
                    .iter()
                    .enumerate()
                    .any(|(i, r)| i != index && r.key == *name)
            })
            .collect()
    }

    /// Bind a row to a group and reset it to the group's first level
    pub fn select_group(&mut self, index: usize, group: &str) -> CategoryResult<()> {
        let current = self.row(index).ok_or(CategoryError::RowOutOfRange(index))?;
        if current.is_mandatory && current.key != group {
            return Err(CategoryError::MandatoryRow(current.key.clone()));
        }
        if !group.is_empty()
            && self
                .rows
                .iter()
                .enumerate()
                .any(|(i, r)| i != index && r.key == group)
        {
            return Err(CategoryError::GroupInUse(group.to_string()));
        }

        let fresh = if group.is_empty() {
            CategoryAssignment::default()
        } else {
            let node = self
                .forest
                .group(group)
                .ok_or_else(|| CategoryError::UnknownGroup(group.to_string()))?;
            CategoryAssignment::for_group(node)
        };

        let previous = std::mem::replace(&mut self.rows[index], fresh);
        if previous.multi_select && previous.key != group {
            self.list.retain(|e| e.product_group_name != previous.key);
        }
        self.row_errors.remove(&index);
        tracing::debug!(row = index, group = %group, "Category group selected");
        Ok(())
    }

    /// Choose `node_id` among the row's current options
    ///
    /// An inner node moves one level down. A leaf finalizes the row and closes
    /// its selection. Choosing again at an already named level replaces that
    /// level's segment.
    pub fn drill_into(&mut self, index: usize, node_id: &str) -> CategoryResult<()> {
        let row = self.keyed_row_mut(index)?;
        let node = row
            .options
            .iter()
            .find(|n| n.id == node_id)
            .cloned()
            .ok_or_else(|| CategoryError::OptionNotAvailable(node_id.to_string()))?;

        let mut segments: Vec<String> = row.label_segments().into_iter().map(String::from).collect();
        if segments.len() + 1 == row.count {
            segments.pop();
        }
        segments.push(node.name.clone());
        row.hierarchy_label = segments.join(HIERARCHY_SEPARATOR);

        if node.is_leaf() {
            tracing::debug!(row = index, leaf = %node.name, label = %row.hierarchy_label, "Category finalized");
            row.value = Some(node);
            row.selection_open = false;
        } else {
            tracing::debug!(row = index, node = %node.name, depth = row.count + 1, "Category drilled");
            row.value = None;
            row.count += 1;
            row.options = node.child.clone();
            row.parent_category = Some(node);
        }
        self.row_errors.remove(&index);
        Ok(())
    }

    /// Step one level up
    ///
    /// A finalized row drops its leaf. A row inside the tree fetches the
    /// parent of its current level through `lookup`; on failure the row is
    /// left untouched. Anything else returns to the group's top level.
    pub async fn go_back(
        &mut self,
        index: usize,
        lookup: &dyn CategoryCatalog,
    ) -> CategoryResult<BackOutcome> {
        let row = self.keyed_row_mut(index)?;

        if row.value.take().is_some() {
            pop_segment(row);
            return Ok(BackOutcome::Moved);
        }

        let parent_id = row
            .parent_category
            .as_ref()
            .and_then(|p| p.parent_id.clone());

        let Some(parent_id) = parent_id else {
            let key = row.key.clone();
            let options = self.forest.group_children(&key);
            reset_row(self.row_mut(index)?, options);
            return Ok(BackOutcome::Reset);
        };

        match lookup.fetch_category(&parent_id).await {
            Ok(parent) => {
                let row = self.row_mut(index)?;
                pop_segment(row);
                row.options = parent.child.clone();
                row.parent_category = Some(parent);
                row.count = row.count.saturating_sub(1).max(2);
                Ok(BackOutcome::Moved)
            }
            Err(e) => {
                tracing::warn!(row = index, parent = %parent_id, error = %e, "Parent category lookup failed");
                Ok(BackOutcome::Unchanged)
            }
        }
    }

    /// Drop the row's selection and return to the group's top level
    pub fn clear_selection(&mut self, index: usize) -> CategoryResult<()> {
        let key = self.row(index).ok_or(CategoryError::RowOutOfRange(index))?.key.clone();
        let options = self.forest.group_children(&key);
        reset_row(self.row_mut(index)?, options);
        Ok(())
    }

    pub fn open_selection(&mut self, index: usize) -> CategoryResult<()> {
        self.keyed_row_mut(index)?.selection_open = true;
        Ok(())
    }

    pub fn close_selection(&mut self, index: usize) -> CategoryResult<()> {
        self.row_mut(index)?.selection_open = false;
        Ok(())
    }

    /// Append a blank row; there can be at most one row per group
    pub fn add_row(&mut self) -> CategoryResult<usize> {
        if self.rows.len() >= self.forest.len() {
            return Err(CategoryError::RowLimit);
        }
        self.rows.push(CategoryAssignment::default());
        Ok(self.rows.len() - 1)
    }

    pub fn remove_row(&mut self, index: usize) -> CategoryResult<CategoryAssignment> {
        let row = self.row(index).ok_or(CategoryError::RowOutOfRange(index))?;
        if row.is_mandatory {
            return Err(CategoryError::MandatoryRow(row.key.clone()));
        }
        if self.protected_groups.iter().any(|g| *g == row.key) {
            return Err(CategoryError::ProtectedGroup(row.key.clone()));
        }

        let removed = self.rows.remove(index);
        if removed.multi_select {
            self.list.retain(|e| e.product_group_name != removed.key);
        }
        // Row indices shifted
        self.row_errors.clear();
        Ok(removed)
    }

    /// Replace every list entry of a multi-select group
    ///
    /// Entries follow the group's leaf order; unknown ids are ignored.
    pub fn set_multi_select_values(&mut self, group: &str, leaf_ids: &[String]) -> CategoryResult<()> {
        let node = self
            .forest
            .group(group)
            .ok_or_else(|| CategoryError::UnknownGroup(group.to_string()))?;
        if !node.multi_select {
            return Err(CategoryError::NotMultiSelect(group.to_string()));
        }

        let chosen: HashSet<&str> = leaf_ids.iter().map(String::as_str).collect();
        let entries: Vec<ProductCategoryEntry> = self
            .forest
            .leaves(group)
            .iter()
            .filter(|leaf| chosen.contains(leaf.id.as_str()))
            .map(|leaf| ProductCategoryEntry::new(group, leaf.clone()))
            .collect();

        self.list.retain(|e| e.product_group_name != group);
        self.list.extend(entries);

        if let Some(i) = self.rows.iter().position(|r| r.key == group) {
            self.row_errors.remove(&i);
        }
        Ok(())
    }

    /// Leaf ids currently selected for a multi-select group
    pub fn selected_values(&self, group: &str) -> Vec<&str> {
        self.list
            .iter()
            .filter(|e| e.product_group_name == group)
            .map(|e| e.node.id.as_str())
            .collect()
    }

    /// Choices offered to a multi-select group
    pub fn multi_select_options(&self, group: &str) -> &[CategoryNode] {
        self.forest.leaves(group)
    }

    /// Single-select rows for submission
    pub fn product_categories(&self) -> Vec<CategoryAssignment> {
        self.rows.iter().filter(|r| !r.multi_select).cloned().collect()
    }

    pub fn product_categories_list(&self) -> &[ProductCategoryEntry] {
        &self.list
    }

    pub fn row_error(&self, index: usize) -> Option<&str> {
        self.row_errors.get(&index).map(String::as_str)
    }

    /// Check every row and remember the messages per row
    ///
    /// A keyed single-select row needs a leaf, a keyed multi-select row at
    /// least one entry, and every mandatory group needs a row.
    pub fn validate(&mut self) -> Vec<(usize, String)> {
        let mut errors = BTreeMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            if row.key.is_empty() {
                if row.is_mandatory {
                    errors.insert(i, "Category is required".to_string());
                }
                continue;
            }
            let complete = if row.multi_select {
                self.list.iter().any(|e| e.product_group_name == row.key)
            } else {
                row.is_finalized()
            };
            if !complete {
                errors.insert(i, format!("Select a {} category", row.key));
            }
        }
        self.row_errors = errors;
        self.row_errors
            .iter()
            .map(|(i, msg)| (*i, msg.clone()))
            .collect()
    }

    /// Mandatory groups that have no row at all
    pub fn missing_mandatory_groups(&self) -> Vec<&str> {
        self.forest
            .mandatory_groups()
            .filter(|g| !self.rows.iter().any(|r| r.key == g.name))
            .map(|g| g.name.as_str())
            .collect()
    }
}

/// Drop the deepest label segment
fn pop_segment(row: &mut CategoryAssignment) {
    match row.hierarchy_label.rfind(HIERARCHY_SEPARATOR) {
        Some(pos) => row.hierarchy_label.truncate(pos),
        None => row.hierarchy_label.clear(),
    }
}

fn reset_row(row: &mut CategoryAssignment, options: Vec<CategoryNode>) {
    row.hierarchy_label.clear();
    row.value = None;
    row.count = 2;
    row.options = options;
    row.parent_category = None;
}

/// Rebuild a persisted row against the live catalog
async fn restore_row(
    forest: &CategoryForest,
    persisted: &CategoryAssignment,
    lookup: &dyn CategoryCatalog,
) -> CategoryAssignment {
    let group = forest.group(&persisted.key);
    let mut row = CategoryAssignment {
        key: persisted.key.clone(),
        multi_select: group.map_or(persisted.multi_select, |g| g.multi_select),
        is_mandatory: group.map_or(persisted.is_mandatory, |g| g.is_mandatory),
        options: group.map(|g| g.child.clone()).unwrap_or_default(),
        ..Default::default()
    };

    let Some(leaf) = persisted.value.clone() else {
        return row;
    };

    let start = leaf
        .parent_id
        .clone()
        .or_else(|| forest.parent_of(&leaf.id).map(|p| p.id.clone()));

    match walk_ancestors(start, lookup).await {
        Ok(chain) => {
            // The last ancestor is the group itself, which the label omits
            let mut segments: Vec<String> =
                chain.iter().rev().skip(1).map(|n| n.name.clone()).collect();
            segments.push(leaf.name.clone());
            row.hierarchy_label = segments.join(HIERARCHY_SEPARATOR);
            if let Some(parent) = chain.into_iter().next() {
                row.options = parent.child.clone();
                row.parent_category = Some(parent);
            }
        }
        Err(e) => {
            tracing::warn!(group = %persisted.key, leaf = %leaf.id, error = %e, "Keeping persisted category label");
            row.hierarchy_label = persisted.hierarchy_label.clone();
            if let Some(parent) = forest.parent_of(&leaf.id) {
                row.options = parent.child.clone();
            }
        }
    }

    row.count = (row.label_segments().len() + 1).max(2);
    row.value = Some(leaf);
    row
}

/// Ancestors from the immediate parent up to the root group
async fn walk_ancestors(
    start: Option<String>,
    lookup: &dyn CategoryCatalog,
) -> LookupResult<Vec<CategoryNode>> {
    let mut chain = Vec::new();
    let mut next = start;
    while let Some(id) = next {
        if chain.len() >= MAX_ANCESTOR_DEPTH {
            return Err(LookupError::Malformed(format!(
                "category ancestry deeper than {MAX_ANCESTOR_DEPTH}"
            )));
        }
        let node = lookup.fetch_category(&id).await?;
        next = node.parent_id.clone();
        chain.push(node);
    }
    Ok(chain)
}
