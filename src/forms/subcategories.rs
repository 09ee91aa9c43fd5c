use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::subcategory::NewSubCategory;
use crate::domain::types::{
    CategoryId, SubCategoryDescription, SubCategoryId, SubCategoryName, SubCategorySlug,
    TypeConstraintError,
};

/// Parent selects post `0` (or nothing) for "no parent".
fn parent_from_form(value: Option<i32>) -> Result<Option<SubCategoryId>, TypeConstraintError> {
    match value {
        None | Some(0) => Ok(None),
        Some(id) => SubCategoryId::new(id).map(Some),
    }
}

/// An empty slug is derived from the name, a given one is normalised.
fn slug_from_form(
    slug: Option<&str>,
    name: &SubCategoryName,
) -> Result<SubCategorySlug, TypeConstraintError> {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => SubCategorySlug::slugify(slug),
        None => SubCategorySlug::slugify(name.as_str()),
    }
}

fn description_from_form(value: Option<String>) -> Option<SubCategoryDescription> {
    value.and_then(|text| SubCategoryDescription::new(text).ok())
}

struct SubCategoryFields {
    category_id: i32,
    parent_id: Option<i32>,
    name: String,
    slug: Option<String>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
    description: Option<String>,
}

impl SubCategoryFields {
    fn into_new_subcategory(self) -> Result<NewSubCategory, TypeConstraintError> {
        let name = SubCategoryName::new(self.name)?;
        let slug = slug_from_form(self.slug.as_deref(), &name)?;
        Ok(NewSubCategory {
            category_id: CategoryId::new(self.category_id)?,
            parent_id: parent_from_form(self.parent_id)?,
            name,
            slug,
            is_active: self.is_active.unwrap_or(true),
            sort_order: self.sort_order,
            description: description_from_form(self.description),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddSubCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 0))]
    pub parent_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddSubCategoryFormPayload {
    pub subcategory: NewSubCategory,
}

#[derive(Debug, Error)]
pub enum AddSubCategoryFormError {
    #[error("Add subcategory form validation failed: {0}")]
    Validation(String),
    #[error("Add subcategory form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddSubCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddSubCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddSubCategoryForm> for AddSubCategoryFormPayload {
    type Error = AddSubCategoryFormError;

    fn try_from(value: AddSubCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let fields = SubCategoryFields {
            category_id: value.category_id,
            parent_id: value.parent_id,
            name: value.name,
            slug: value.slug,
            is_active: value.is_active,
            sort_order: value.sort_order,
            description: value.description,
        };

        Ok(Self {
            subcategory: fields.into_new_subcategory()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateSubCategoryForm {
    #[validate(range(min = 1))]
    pub subcategory_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 0))]
    pub parent_id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSubCategoryFormPayload {
    pub subcategory_id: SubCategoryId,
    pub subcategory: NewSubCategory,
}

#[derive(Debug, Error)]
pub enum UpdateSubCategoryFormError {
    #[error("Update subcategory form validation failed: {0}")]
    Validation(String),
    #[error("Update subcategory form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateSubCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateSubCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateSubCategoryForm> for UpdateSubCategoryFormPayload {
    type Error = UpdateSubCategoryFormError;

    fn try_from(value: UpdateSubCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let subcategory_id = SubCategoryId::new(value.subcategory_id)?;
        let fields = SubCategoryFields {
            category_id: value.category_id,
            parent_id: value.parent_id,
            name: value.name,
            slug: value.slug,
            is_active: value.is_active,
            sort_order: value.sort_order,
            description: value.description,
        };

        Ok(Self {
            subcategory_id,
            subcategory: fields.into_new_subcategory()?,
        })
    }
}
