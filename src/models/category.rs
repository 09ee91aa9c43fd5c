use serde::Deserialize;

use crate::domain::category::Category;
use crate::domain::types::{CategoryName, TypeConstraintError};

/// Category as it arrives from the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    #[serde(alias = "_id")]
    pub id: i32,
    #[serde(alias = "title")]
    pub name: String,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = TypeConstraintError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            name: CategoryName::new(record.name)?,
        })
    }
}
