use thiserror::Error;

use crate::domain::hierarchy::{HierarchyViolation, WriteConflict};

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
    /// Submitted form data failed validation.
    #[error("{0}")]
    Form(String),
    /// A value broke a domain type constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// The requested placement breaks the hierarchy invariants.
    #[error("{0}")]
    Hierarchy(HierarchyViolation),
    /// A name or slug uniqueness violation, explained for its scope.
    #[error("{0}")]
    Conflict(WriteConflict),
    /// Neither lookup tier could produce the subcategory list. Distinct from
    /// an empty result.
    #[error("failed to resolve subcategories: {0}")]
    Resolution(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
