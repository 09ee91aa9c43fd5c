pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod errors;
pub mod ordering;
pub mod parents;
pub mod reconcile;
pub mod subcategories;
