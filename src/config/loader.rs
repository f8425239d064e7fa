// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawRecipeFile, RecipeFile};
use crate::errors::Result;

/// Read and deserialize a recipe file without semantic validation.
///
/// Use [`load_and_validate`] for anything that builds graphs from it.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRecipeFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

/// Deserialize recipe TOML from a string.
pub fn parse_str(contents: &str) -> Result<RawRecipeFile> {
    let raw: RawRecipeFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a recipe file and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - duplicate or empty step ids,
///   - unknown `after` references,
///   - dependency cycles,
///   - session settings sanity.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<RecipeFile> {
    let raw = load_from_path(&path)?;
    RecipeFile::try_from(raw)
}

