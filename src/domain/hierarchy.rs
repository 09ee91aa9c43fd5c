//! Client-side checks for the two-level subcategory hierarchy.
//!
//! The backend stays authoritative; these checks only stop writes that are
//! known to be invalid against the snapshot the caller just fetched.

use serde::Serialize;
use thiserror::Error;

use crate::domain::subcategory::{NewSubCategory, SubCategory};
use crate::domain::types::{CategoryId, SubCategoryId, SubCategoryName, SubCategorySlug};

/// Where a uniqueness violation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictScope {
    /// Duplicate among siblings sharing one parent.
    SameParent,
    /// Duplicate across the whole category (or among top-level nodes).
    Global,
}

impl ConflictScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameParent => "same-parent",
            Self::Global => "global",
        }
    }
}

/// A name/slug uniqueness violation with an operator-facing explanation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct WriteConflict {
    pub scope: ConflictScope,
    pub message: String,
}

impl WriteConflict {
    /// Duplicate under the same parent; a different parent would accept it.
    pub fn same_parent(detail: &str) -> Self {
        Self {
            scope: ConflictScope::SameParent,
            message: format!(
                "{detail}. The same name or slug is allowed under a different parent subcategory."
            ),
        }
    }

    /// Duplicate reported for a nested node without any parent scoping, which
    /// suggests the backend enforces uniqueness category-wide.
    pub fn category_wide(detail: &str) -> Self {
        Self {
            scope: ConflictScope::Global,
            message: format!(
                "{detail}. The backend may be enforcing name and slug uniqueness across the \
                 whole category instead of per parent, so this name can be rejected under \
                 every parent."
            ),
        }
    }

    /// Duplicate among top-level nodes.
    pub fn top_level(detail: &str) -> Self {
        Self {
            scope: ConflictScope::Global,
            message: format!(
                "{detail}. Top-level subcategories must have unique names and slugs within \
                 the category; the same name can still be used for a subcategory nested \
                 under a parent."
            ),
        }
    }
}

/// Ways a requested placement breaks the hierarchy invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyViolation {
    #[error("subcategory {0} cannot be its own parent")]
    SelfParent(SubCategoryId),
    #[error("parent subcategory {0} does not exist in this category")]
    UnknownParent(SubCategoryId),
    #[error("subcategory {parent} is itself nested under {grandparent} and cannot be a parent")]
    ParentNotTopLevel {
        parent: SubCategoryId,
        grandparent: SubCategoryId,
    },
    #[error("parent subcategory {parent} belongs to category {parent_category}, not {category}")]
    CategoryMismatch {
        parent: SubCategoryId,
        parent_category: CategoryId,
        category: CategoryId,
    },
    #[error("subcategory {node} has {children} nested subcategories and cannot be nested itself")]
    HasChildren { node: SubCategoryId, children: usize },
    #[error("a subcategory named \"{name}\" already exists at this level")]
    DuplicateName {
        name: SubCategoryName,
        parent: Option<SubCategoryId>,
    },
    #[error("a subcategory with slug \"{slug}\" already exists at this level")]
    DuplicateSlug {
        slug: SubCategorySlug,
        parent: Option<SubCategoryId>,
    },
}

impl HierarchyViolation {
    /// Uniqueness violations map onto a [`WriteConflict`]; structural ones do not.
    pub fn as_conflict(&self) -> Option<WriteConflict> {
        let parent = match self {
            Self::DuplicateName { parent, .. } | Self::DuplicateSlug { parent, .. } => *parent,
            _ => return None,
        };
        let detail = self.to_string();
        Some(match parent {
            Some(_) => WriteConflict::same_parent(&detail),
            None => WriteConflict::top_level(&detail),
        })
    }
}

/// Nodes nested directly under `parent`.
pub fn children_of(
    snapshot: &[SubCategory],
    parent: SubCategoryId,
) -> impl Iterator<Item = &SubCategory> {
    snapshot.iter().filter(move |node| node.is_child_of(parent))
}

/// Checks `draft` against `snapshot` before it is submitted.
///
/// `editing` is the id of the node being updated, or `None` for a create.
pub fn validate_placement(
    snapshot: &[SubCategory],
    draft: &NewSubCategory,
    editing: Option<SubCategoryId>,
) -> Result<(), HierarchyViolation> {
    if let Some(parent_id) = draft.parent_id {
        if editing == Some(parent_id) {
            return Err(HierarchyViolation::SelfParent(parent_id));
        }

        let parent = snapshot
            .iter()
            .find(|node| node.id == parent_id)
            .ok_or(HierarchyViolation::UnknownParent(parent_id))?;

        if let Some(grandparent) = parent.parent_id {
            return Err(HierarchyViolation::ParentNotTopLevel {
                parent: parent_id,
                grandparent,
            });
        }

        if parent.category_id != draft.category_id {
            return Err(HierarchyViolation::CategoryMismatch {
                parent: parent_id,
                parent_category: parent.category_id,
                category: draft.category_id,
            });
        }

        if let Some(node) = editing {
            let children = children_of(snapshot, node).count();
            if children > 0 {
                return Err(HierarchyViolation::HasChildren { node, children });
            }
        }
    }

    for sibling in snapshot.iter().filter(|node| {
        node.category_id == draft.category_id
            && node.parent_id == draft.parent_id
            && Some(node.id) != editing
    }) {
        if sibling.name == draft.name {
            return Err(HierarchyViolation::DuplicateName {
                name: draft.name.clone(),
                parent: draft.parent_id,
            });
        }
        if sibling.slug.as_ref() == Some(&draft.slug) {
            return Err(HierarchyViolation::DuplicateSlug {
                slug: draft.slug.clone(),
                parent: draft.parent_id,
            });
        }
    }

    Ok(())
}
