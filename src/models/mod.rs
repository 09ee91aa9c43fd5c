//! Wire records and configuration models.

pub mod category;
#[cfg(feature = "client")]
pub mod config;
pub mod subcategory;
