//! Deterministic display order for a flat subcategory list.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::subcategory::SubCategory;
use crate::domain::types::SubCategoryId;

/// Nested node whose parent is missing from the fetched snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceIntegrityWarning {
    pub node: SubCategoryId,
    pub missing_parent: SubCategoryId,
}

/// Total order used for display.
///
/// Top-level nodes come first, then nested nodes grouped by parent id
/// ascending. Inside a group nodes sort by `sort_order` (unset last), then
/// case-insensitive name, then exact name, then id.
pub fn display_cmp(a: &SubCategory, b: &SubCategory) -> Ordering {
    // `None < Some(_)`, so the top-level group leads.
    a.parent_id
        .cmp(&b.parent_id)
        .then_with(|| sort_key(a).cmp(&sort_key(b)))
        .then_with(|| a.name.folded().cmp(&b.name.folded()))
        .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        .then_with(|| a.id.cmp(&b.id))
}

fn sort_key(node: &SubCategory) -> i32 {
    node.sort_order.unwrap_or(i32::MAX)
}

/// Return a display-ordered copy of `nodes`. The input is left untouched.
///
/// Nodes with a dangling `parent_id` stay in the nested section, grouped
/// under the id they reference.
pub fn order_for_display(nodes: &[SubCategory]) -> Vec<SubCategory> {
    let mut ordered = nodes.to_vec();
    ordered.sort_by(display_cmp);
    ordered
}

/// Nested nodes whose parent is not part of `nodes`.
pub fn find_orphans(nodes: &[SubCategory]) -> Vec<ReferenceIntegrityWarning> {
    let ids: HashSet<SubCategoryId> = nodes.iter().map(|node| node.id).collect();
    nodes
        .iter()
        .filter_map(|node| {
            node.parent_id
                .filter(|parent| !ids.contains(parent))
                .map(|missing_parent| ReferenceIntegrityWarning {
                    node: node.id,
                    missing_parent,
                })
        })
        .collect()
}
