use std::collections::HashMap;

use serde::Serialize;

use crate::domain::subcategory::SubCategory;
use crate::domain::types::SubCategoryId;

/// Separator between parent and child names in row labels.
pub const LABEL_SEPARATOR: &str = " › ";

/// One row of the subcategory table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryDto {
    pub id: i32,
    pub category_id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub slug: Option<String>,
    /// 0 for top-level rows, 1 for nested rows.
    pub depth: u8,
    pub parent_name: Option<String>,
    /// Name prefixed with the parent's name for nested rows.
    pub label: String,
    pub sort_order: Option<i32>,
    pub is_active: bool,
    /// Set when `parent_id` points at a node missing from the listing.
    pub orphaned: bool,
}

fn names_of(nodes: &[SubCategory]) -> HashMap<SubCategoryId, &str> {
    nodes
        .iter()
        .map(|node| (node.id, node.name.as_str()))
        .collect()
}

impl SubCategoryDto {
    /// Build rows for `ordered`, keeping its order.
    pub fn rows(ordered: &[SubCategory]) -> Vec<Self> {
        let names = names_of(ordered);
        ordered.iter().map(|node| Self::row(node, &names)).collect()
    }

    /// Build the row of `node`, looking its parent up in `snapshot`.
    pub fn row_within(snapshot: &[SubCategory], node: &SubCategory) -> Self {
        Self::row(node, &names_of(snapshot))
    }

    fn row(node: &SubCategory, names: &HashMap<SubCategoryId, &str>) -> Self {
        let parent_name = node
            .parent_id
            .and_then(|parent| names.get(&parent))
            .map(|name| name.to_string());
        let orphaned = node.parent_id.is_some() && parent_name.is_none();
        let label = match (&parent_name, node.parent_id) {
            (Some(parent), _) => format!("{parent}{LABEL_SEPARATOR}{}", node.name),
            (None, Some(missing)) => format!("{} (missing parent #{missing})", node.name),
            (None, None) => node.name.to_string(),
        };

        Self {
            id: node.id.get(),
            category_id: node.category_id.get(),
            parent_id: node.parent_id.map(SubCategoryId::get),
            name: node.name.to_string(),
            slug: node.slug.as_ref().map(|slug| slug.to_string()),
            depth: u8::from(node.parent_id.is_some()),
            parent_name,
            label,
            sort_order: node.sort_order,
            is_active: node.is_active,
            orphaned,
        }
    }
}
