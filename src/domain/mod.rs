//! Taxonomy entities and the invariants they obey.

pub mod category;
pub mod hierarchy;
pub mod subcategory;
pub mod types;
