pub mod subcategories;
