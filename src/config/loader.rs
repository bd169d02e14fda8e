// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{CatalogFile, RawCatalogFile};
use crate::errors::Result;

/// Catalog used when `--catalog` is not given.
pub fn default_catalog_path() -> PathBuf {
    PathBuf::from("Coursemap.toml")
}

/// Read and deserialize a catalog without checking roadmaps or quizzes.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCatalogFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = contents.len(), "catalog read");
    Ok(toml::from_str(&contents)?)
}

/// Read a catalog and validate every course in it.
///
/// Roadmaps must be acyclic with known endpoints and statuses that agree
/// with their prerequisites. Quizzes must have a positive total weight and
/// point at an assessment node.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<CatalogFile> {
    CatalogFile::try_from(load_from_path(path)?)
}

/// [`load_and_validate`] for catalog text already in memory.
pub fn parse_and_validate(contents: &str) -> Result<CatalogFile> {
    CatalogFile::try_from(toml::from_str::<RawCatalogFile>(contents)?)
}
