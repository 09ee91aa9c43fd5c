//! Flattened view models handed to presentation code.

pub mod categories;
pub mod subcategories;
