//! Indexed category forest

use std::collections::HashMap;

use shared::models::CategoryNode;

/// Catalog of selectable category groups
///
/// Every node is indexed by id (first occurrence wins) through its path of
/// child positions, and each group's leaves are precomputed for multi-select
/// pickers.
#[derive(Debug, Clone, Default)]
pub struct CategoryForest {
    groups: Vec<CategoryNode>,
    paths: HashMap<String, Vec<usize>>,
    leaves: HashMap<String, Vec<CategoryNode>>,
}

impl CategoryForest {
    pub fn new(groups: Vec<CategoryNode>) -> Self {
        let mut paths = HashMap::new();
        let mut leaves = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            index_paths(group, &mut vec![i], &mut paths);
            leaves
                .entry(group.name.clone())
                .or_insert_with(|| group.leaves().into_iter().cloned().collect());
        }
        Self {
            groups,
            paths,
            leaves,
        }
    }

    /// Split a fetched catalog into the selectable forest and the material group
    ///
    /// The material group is matched by name, ignoring ASCII case.
    pub fn split_catalog(
        catalog: Vec<CategoryNode>,
        material_group: &str,
    ) -> (Self, Option<CategoryNode>) {
        let (materials, groups): (Vec<_>, Vec<_>) = catalog
            .into_iter()
            .partition(|g| g.name.eq_ignore_ascii_case(material_group));
        (Self::new(groups), materials.into_iter().next())
    }

    pub fn groups(&self) -> &[CategoryNode] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, name: &str) -> Option<&CategoryNode> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn mandatory_groups(&self) -> impl Iterator<Item = &CategoryNode> {
        self.groups.iter().filter(|g| g.is_mandatory)
    }

    /// Top-level children of a group (empty for unknown groups)
    pub fn group_children(&self, name: &str) -> Vec<CategoryNode> {
        self.group(name).map(|g| g.child.clone()).unwrap_or_default()
    }

    /// Leaves of a group, depth-first
    pub fn leaves(&self, group: &str) -> &[CategoryNode] {
        self.leaves.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node(&self, id: &str) -> Option<&CategoryNode> {
        self.node_at(self.paths.get(id)?)
    }

    /// Structural parent of a node; `None` for groups and unknown ids
    pub fn parent_of(&self, id: &str) -> Option<&CategoryNode> {
        let path = self.paths.get(id)?;
        if path.len() < 2 {
            return None;
        }
        self.node_at(&path[..path.len() - 1])
    }

    fn node_at(&self, path: &[usize]) -> Option<&CategoryNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.groups.get(*first)?;
        for &i in rest {
            node = node.child.get(i)?;
        }
        Some(node)
    }
}

fn index_paths(node: &CategoryNode, path: &mut Vec<usize>, out: &mut HashMap<String, Vec<usize>>) {
    out.entry(node.id.clone()).or_insert_with(|| path.clone());
    for (i, child) in node.child.iter().enumerate() {
        path.push(i);
        index_paths(child, path, out);
        path.pop();
    }
}
