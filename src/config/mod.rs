// src/config/mod.rs

//! Recipe file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a recipe file from disk (`loader.rs`).
//! - Validate ids, dependencies and acyclicity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{RawRecipeFile, RecipeFile, RecipeSection, SessionSection, StepConfig};
