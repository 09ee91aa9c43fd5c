//! Repairs write echoes and explains uniqueness conflicts.

use crate::domain::hierarchy::WriteConflict;
use crate::domain::subcategory::{SubCategory, WrittenSubCategory};
use crate::domain::types::SubCategoryId;

/// Wording that shows the backend scoped a uniqueness check to one parent.
const PARENT_SCOPE_HINTS: &[&str] = &["parent", "sibling", "same level"];

/// Produce a complete record from a create/update echo.
///
/// The requested parent is applied only when the backend omitted the field.
/// An explicit value, `null` included, is authoritative and kept as is.
pub fn reconcile(
    server_result: WrittenSubCategory,
    requested_parent_id: Option<SubCategoryId>,
) -> SubCategory {
    let parent_id = match server_result.parent_id {
        Some(echoed) => echoed,
        None => {
            log::debug!(
                "Backend omitted parent of subcategory {}; applying requested {:?}",
                server_result.id,
                requested_parent_id
            );
            requested_parent_id
        }
    };
    server_result.with_parent(parent_id)
}

/// Decide what a backend uniqueness error means under parent-scoped
/// uniqueness.
pub fn classify_write_conflict(
    error_message: &str,
    requested_parent_id: Option<SubCategoryId>,
) -> WriteConflict {
    let detail = error_message.trim().trim_end_matches('.');
    let lowered = detail.to_lowercase();
    let parent_scoped = PARENT_SCOPE_HINTS.iter().any(|hint| lowered.contains(hint));

    match requested_parent_id {
        None => WriteConflict::top_level(detail),
        Some(_) if parent_scoped => WriteConflict::same_parent(detail),
        Some(parent) => {
            log::warn!(
                "Uniqueness conflict under parent {parent} without parent scoping: {detail}"
            );
            WriteConflict::category_wide(detail)
        }
    }
}
