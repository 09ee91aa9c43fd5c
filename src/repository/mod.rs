use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::subcategory::{NewSubCategory, SubCategory, WrittenSubCategory};
use crate::domain::types::{CategoryId, SubCategoryId};

pub mod errors;
#[cfg(feature = "client")]
pub mod http;

pub use errors::{RepositoryError, RepositoryResult};

/// Query parameters for listing subcategories of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategoryListQuery {
    /// Category identifier.
    pub category_id: CategoryId,
}

impl SubCategoryListQuery {
    pub fn new(category_id: CategoryId) -> Self {
        Self { category_id }
    }
}

/// Read-only operations for category entities.
#[async_trait]
pub trait CategoryReader: Send + Sync {
    /// List every category visible to the console.
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations for subcategory entities.
#[async_trait]
pub trait SubCategoryReader: Send + Sync {
    /// List all subcategories of the queried category, top-level and nested.
    ///
    /// Every deployment is expected to provide this.
    async fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<Vec<SubCategory>>;

    /// List the subcategories that may serve as a parent within a category,
    /// optionally leaving out the node currently being edited.
    ///
    /// Not every deployment exposes this; a missing route surfaces as an
    /// error for which [`RepositoryError::is_route_missing`] holds.
    async fn list_available_parents(
        &self,
        category_id: CategoryId,
        exclude_id: Option<SubCategoryId>,
    ) -> RepositoryResult<Vec<SubCategory>>;
}

/// Write operations for subcategory entities.
#[async_trait]
pub trait SubCategoryWriter: Send + Sync {
    /// Persist a new subcategory and return the backend's echo of it.
    async fn create_subcategory(
        &self,
        subcategory: &NewSubCategory,
    ) -> RepositoryResult<WrittenSubCategory>;
    /// Replace an existing subcategory and return the backend's echo of it.
    async fn update_subcategory(
        &self,
        id: SubCategoryId,
        subcategory: &NewSubCategory,
    ) -> RepositoryResult<WrittenSubCategory>;
}
