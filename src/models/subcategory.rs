//! Wire representation of subcategory records.
//!
//! Backends disagree on key names and envelopes. Everything is normalised
//! here so the domain layer only ever sees [`SubCategory`] and
//! [`WrittenSubCategory`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::subcategory::{NewSubCategory, SubCategory, WrittenSubCategory};
use crate::domain::types::{
    CategoryId, SubCategoryDescription, SubCategoryId, SubCategoryName, SubCategorySlug,
    TypeConstraintError,
};

/// Keeps "key absent" (`None`) apart from "key is null" (`Some(None)`).
///
/// Must be combined with `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reference to another entity given either as a bare id or as an object.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Reference {
    Id(i32),
    Object {
        #[serde(alias = "_id")]
        id: i32,
    },
}

impl Reference {
    pub fn id(self) -> i32 {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

/// A list payload, either bare or wrapped in a well-known envelope key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Wrapped {
        #[serde(
            alias = "items",
            alias = "results",
            alias = "subcategories",
            alias = "subCategories",
            alias = "parents",
            alias = "categories"
        )]
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// A single-record payload, either bare or wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordEnvelope<T> {
    Wrapped {
        #[serde(alias = "subcategory", alias = "subCategory", alias = "item")]
        data: T,
    },
    Bare(T),
}

impl<T> RecordEnvelope<T> {
    pub fn into_record(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Subcategory as it arrives from the backend.
///
/// Only numeric identifiers are supported: `_id` is accepted as a key name,
/// but a string value such as a Mongo ObjectId fails to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct SubCategoryRecord {
    #[serde(alias = "_id")]
    pub id: i32,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "categoryId")]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub category: Option<Reference>,
    #[serde(default, alias = "parentId", deserialize_with = "present")]
    pub parent_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub parent: Option<Option<Reference>>,
    #[serde(default, alias = "sortOrder", alias = "order")]
    pub sort_order: Option<i32>,
    #[serde(default, alias = "isActive", alias = "active")]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SubCategoryRecord {
    /// Parent `0` is the "no parent" sentinel, as in the forms, and reads as
    /// an explicit null.
    fn echoed_parent(&self) -> Option<Option<i32>> {
        self.parent_id
            .or_else(|| self.parent.map(|parent| parent.map(Reference::id)))
            .map(|parent| parent.filter(|&id| id != 0))
    }
}

/// Stored slugs predating validation are re-slugified instead of rejected.
fn lenient_slug(raw: Option<String>) -> Option<SubCategorySlug> {
    let raw = raw?;
    SubCategorySlug::new(raw.as_str())
        .or_else(|_| SubCategorySlug::slugify(&raw))
        .ok()
}

fn optional_description(raw: Option<String>) -> Option<SubCategoryDescription> {
    raw.and_then(|text| SubCategoryDescription::new(text).ok())
}

impl TryFrom<SubCategoryRecord> for WrittenSubCategory {
    type Error = TypeConstraintError;

    fn try_from(record: SubCategoryRecord) -> Result<Self, Self::Error> {
        let category = record
            .category_id
            .or(record.category.map(Reference::id))
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!(
                    "subcategory {} has no category reference",
                    record.id
                ))
            })?;
        let parent_id = match record.echoed_parent() {
            None => None,
            Some(None) => Some(None),
            Some(Some(parent)) => Some(Some(SubCategoryId::new(parent)?)),
        };

        Ok(Self {
            id: SubCategoryId::new(record.id)?,
            category_id: CategoryId::new(category)?,
            parent_id,
            name: SubCategoryName::new(record.name)?,
            slug: lenient_slug(record.slug),
            sort_order: record.sort_order,
            is_active: record.is_active.unwrap_or(true),
            description: optional_description(record.description),
        })
    }
}

impl TryFrom<SubCategoryRecord> for SubCategory {
    type Error = TypeConstraintError;

    /// Listed records without any parent key are treated as top-level.
    fn try_from(record: SubCategoryRecord) -> Result<Self, Self::Error> {
        let written = WrittenSubCategory::try_from(record)?;
        let parent_id = written.parent_id.flatten();
        Ok(written.with_parent(parent_id))
    }
}

/// Request body for create and update calls.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryBody<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub category_id: i32,
    /// Always sent, `null` included, so clearing a parent reaches the backend.
    pub parent_id: Option<i32>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

impl<'a> From<&'a NewSubCategory> for SubCategoryBody<'a> {
    fn from(value: &'a NewSubCategory) -> Self {
        Self {
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            category_id: value.category_id.get(),
            parent_id: value.parent_id.map(SubCategoryId::get),
            is_active: value.is_active,
            sort_order: value.sort_order,
            description: value.description.as_ref().map(|d| d.as_str()),
        }
    }
}
