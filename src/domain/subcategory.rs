use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, SubCategoryDescription, SubCategoryId, SubCategoryName, SubCategorySlug,
};

/// Canonical subcategory record.
///
/// A subcategory is either top-level (`parent_id == None`) or nested under a
/// top-level sibling of the same category. Deeper nesting is never valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub category_id: CategoryId,
    pub parent_id: Option<SubCategoryId>,
    pub name: SubCategoryName,
    pub slug: Option<SubCategorySlug>,
    /// Display tie-break inside a sibling group. `None` sorts last.
    pub sort_order: Option<i32>,
    pub is_active: bool,
    pub description: Option<SubCategoryDescription>,
}

impl SubCategory {
    /// Whether the node sits directly under its category.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the node is nested under `parent`.
    pub fn is_child_of(&self, parent: SubCategoryId) -> bool {
        self.parent_id == Some(parent)
    }
}

/// Data submitted to create or update a [`SubCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubCategory {
    pub category_id: CategoryId,
    pub parent_id: Option<SubCategoryId>,
    pub name: SubCategoryName,
    pub slug: SubCategorySlug,
    pub is_active: bool,
    pub sort_order: Option<i32>,
    pub description: Option<SubCategoryDescription>,
}

/// Record echoed back by the backend after a create or update.
///
/// Some backends accept `parent_id` on write but leave it out of the echo.
/// The outer `Option` of [`WrittenSubCategory::parent_id`] tells the two
/// cases apart: `None` means the field was omitted, `Some(None)` means the
/// backend explicitly reported a top-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSubCategory {
    pub id: SubCategoryId,
    pub category_id: CategoryId,
    pub parent_id: Option<Option<SubCategoryId>>,
    pub name: SubCategoryName,
    pub slug: Option<SubCategorySlug>,
    pub sort_order: Option<i32>,
    pub is_active: bool,
    pub description: Option<SubCategoryDescription>,
}

impl WrittenSubCategory {
    /// Completes the record with the given parent linkage.
    pub fn with_parent(self, parent_id: Option<SubCategoryId>) -> SubCategory {
        SubCategory {
            id: self.id,
            category_id: self.category_id,
            parent_id,
            name: self.name,
            slug: self.slug,
            sort_order: self.sort_order,
            is_active: self.is_active,
            description: self.description,
        }
    }
}

impl From<SubCategory> for WrittenSubCategory {
    fn from(value: SubCategory) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            parent_id: Some(value.parent_id),
            name: value.name,
            slug: value.slug,
            sort_order: value.sort_order,
            is_active: value.is_active,
            description: value.description,
        }
    }
}
