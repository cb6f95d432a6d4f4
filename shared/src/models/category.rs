//! Category Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Separator between segments of a hierarchy label
pub const HIERARCHY_SEPARATOR: &str = " / ";

/// Category node as served by the product-category catalog
///
/// The catalog is a forest: top-level nodes are category groups, `child`
/// holds the next level down and a node with no children is a leaf.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(with = "serde_helpers::flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default, with = "serde_helpers::option_flexible_id")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub child: Vec<CategoryNode>,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub multi_select: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CategoryNode {
    pub fn is_leaf(&self) -> bool {
        self.child.is_empty()
    }

    /// All leaf descendants, depth-first in declared order.
    ///
    /// A leaf node returns nothing: only descendants are collected.
    pub fn leaves(&self) -> Vec<&CategoryNode> {
        let mut out = Vec::new();
        collect_leaves(&self.child, &mut out);
        out
    }

    /// Find a node by id in this subtree (including self)
    pub fn find(&self, id: &str) -> Option<&CategoryNode> {
        if self.id == id {
            return Some(self);
        }
        self.child.iter().find_map(|c| c.find(id))
    }
}

fn collect_leaves<'a>(nodes: &'a [CategoryNode], out: &mut Vec<&'a CategoryNode>) {
    for node in nodes {
        if node.is_leaf() {
            out.push(node);
        } else {
            collect_leaves(&node.child, out);
        }
    }
}

/// One category row of a product
///
/// `count` is the depth currently being chosen (level 2 is the group's direct
/// children). `options`, `count`, `parent_category` and `selection_open` only
/// drive the selection UI and are never submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssignment {
    /// Top-level category group name
    #[serde(default)]
    pub key: String,
    /// Selected leaf, serialized as `{}` while nothing is selected
    #[serde(default, with = "serde_helpers::empty_object")]
    pub value: Option<CategoryNode>,
    /// " / "-joined names from level 2 downward
    #[serde(rename = "heirarchyLabel", default)]
    pub hierarchy_label: String,
    #[serde(default)]
    pub multi_select: bool,
    #[serde(default)]
    pub is_mandatory: bool,

    #[serde(default, skip_serializing)]
    pub options: Vec<CategoryNode>,
    #[serde(default = "default_count", skip_serializing)]
    pub count: usize,
    #[serde(default, skip_serializing)]
    pub parent_category: Option<CategoryNode>,
    #[serde(default, skip_serializing)]
    pub selection_open: bool,
}

fn default_count() -> usize {
    2
}

impl Default for CategoryAssignment {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: None,
            hierarchy_label: String::new(),
            multi_select: false,
            is_mandatory: false,
            options: Vec::new(),
            count: default_count(),
            parent_category: None,
            selection_open: false,
        }
    }
}

impl CategoryAssignment {
    /// Blank row bound to a group, positioned at the group's first level
    pub fn for_group(group: &CategoryNode) -> Self {
        Self {
            key: group.name.clone(),
            options: group.child.clone(),
            multi_select: group.multi_select,
            is_mandatory: group.is_mandatory,
            ..Self::default()
        }
    }

    /// Label split into its segments (empty label has none)
    pub fn label_segments(&self) -> Vec<&str> {
        if self.hierarchy_label.is_empty() {
            Vec::new()
        } else {
            self.hierarchy_label.split(HIERARCHY_SEPARATOR).collect()
        }
    }

    /// Whether a leaf has been chosen for this row
    pub fn is_finalized(&self) -> bool {
        self.value.is_some()
    }
}

/// Flattened multi-select assignment, one per selected leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategoryEntry {
    pub product_group_name: String,
    #[serde(flatten)]
    pub node: CategoryNode,
}

impl ProductCategoryEntry {
    pub fn new(group: impl Into<String>, node: CategoryNode) -> Self {
        Self {
            product_group_name: group.into(),
            node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str, child: Vec<CategoryNode>) -> CategoryNode {
        CategoryNode {
            id: id.into(),
            name: name.into(),
            child,
            ..Default::default()
        }
    }

    #[test]
    fn test_leaves_depth_first() {
        let group = node(
            "g",
            "Fabric Type",
            vec![
                node("w", "Woven", vec![node("d", "Denim", vec![]), node("t", "Twill", vec![])]),
                node("k", "Knit", vec![]),
            ],
        );
        let names: Vec<_> = group.leaves().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Denim", "Twill", "Knit"]);
        assert_eq!(group.find("t").map(|n| n.name.as_str()), Some("Twill"));
        assert!(group.find("missing").is_none());
    }

    #[test]
    fn test_deserialize_catalog_node() {
        let json = r#"{"id":"1","name":"Fabric Type","parentId":null,"child":null,"isMandatory":true,"multiSelect":false}"#;
        let node: CategoryNode = serde_json::from_str(json).unwrap();
        assert!(node.is_leaf());
        assert!(node.is_mandatory);
        assert_eq!(node.parent_id, None);
    }

    #[test]
    fn test_assignment_wire_shape() {
        let row = CategoryAssignment {
            key: "Fabric Type".into(),
            hierarchy_label: "Woven / Denim".into(),
            value: Some(node("d", "Denim", vec![])),
            count: 3,
            options: vec![node("t", "Twill", vec![])],
            ..Default::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["heirarchyLabel"], "Woven / Denim");
        assert_eq!(json["value"]["name"], "Denim");
        assert!(json.get("options").is_none());
        assert!(json.get("count").is_none());

        let blank = serde_json::to_value(CategoryAssignment::default()).unwrap();
        assert_eq!(blank["value"], serde_json::json!({}));

        let back: CategoryAssignment =
            serde_json::from_str(r#"{"key":"Fabric Type","value":{},"heirarchyLabel":""}"#).unwrap();
        assert_eq!(back.value, None);
        assert_eq!(back.count, 2);
    }

    #[test]
    fn test_label_segments() {
        let mut row = CategoryAssignment::default();
        assert!(row.label_segments().is_empty());
        row.hierarchy_label = "Woven / Denim".into();
        assert_eq!(row.label_segments(), vec!["Woven", "Denim"]);
    }

    #[test]
    fn test_entry_flattens_node() {
        let entry = ProductCategoryEntry::new("Occasion", node("c", "Casual", vec![]));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["productGroupName"], "Occasion");
        assert_eq!(json["id"], "c");
        assert_eq!(json["name"], "Casual");
    }
}
