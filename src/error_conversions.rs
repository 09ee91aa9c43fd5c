//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so
//! the `From` impls connecting them live here.

use crate::domain::hierarchy::HierarchyViolation;
use crate::domain::types::TypeConstraintError;
use crate::forms::subcategories::{AddSubCategoryFormError, UpdateSubCategoryFormError};
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<HierarchyViolation> for ServiceError {
    fn from(val: HierarchyViolation) -> Self {
        match val.as_conflict() {
            Some(conflict) => ServiceError::Conflict(conflict),
            None => ServiceError::Hierarchy(val),
        }
    }
}

impl From<AddSubCategoryFormError> for ServiceError {
    fn from(val: AddSubCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateSubCategoryFormError> for ServiceError {
    fn from(val: UpdateSubCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
