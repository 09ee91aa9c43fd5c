//! Subcategory hierarchy resolution for the catalog admin console.
//!
//! The crate builds, validates and orders a two-level taxonomy
//! (category → top-level subcategory → optional nested subcategory) on top
//! of a REST backend that may or may not expose a dedicated "available
//! parents" route and may or may not echo parent linkage on writes.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod services;
