use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Top-level catalog category owning a two-level subcategory tree.
///
/// Categories are managed elsewhere; this crate only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}
