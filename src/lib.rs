//! Shared library for the black-deal demon catalog browser.
//!
//! The crate exposes the catalog types, the multi-criteria filter, the rating
//! classifiers, and the plain-text renderers used by the `demon-catalog`
//! binary. Public functions here form the contract the binary depends on:
//! catalog source resolution, filtering, tiering, and rendering.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod browser;
pub mod catalog;
pub mod filter;
pub mod render;
mod schema_loader;
pub mod tier;

pub use browser::{BrowserState, CatalogPage, Section};
pub use catalog::{
    CatalogIndex, CatalogKey, CatalogMetadata, Demon, DemonCatalog, DemonId, DemonType,
};
pub use filter::{ALL_TYPES, FilterCriteria, RatingRange, TypeSelector, filter_demons};
pub use tier::{LegendEntry, Tier, danger_legend, danger_tier, power_legend, power_tier};

/// Environment variable naming an alternate catalog file.
pub const CATALOG_PATH_ENV: &str = "DEMON_CATALOG_PATH";

/// Where the catalog comes from for this run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

/// Resolve the catalog source.
///
/// Search order: an explicit `--catalog` path, then `DEMON_CATALOG_PATH` when
/// set to a non-empty value, then the catalog embedded in the binary.
pub fn resolve_catalog_source(cli_override: Option<&Path>) -> CatalogSource {
    if let Some(path) = cli_override {
        return CatalogSource::File(path.to_path_buf());
    }
    match env::var_os(CATALOG_PATH_ENV) {
        Some(value) if !value.is_empty() => CatalogSource::File(PathBuf::from(value)),
        _ => CatalogSource::Builtin,
    }
}

/// Load and validate the catalog from `source`.
pub fn load_catalog(source: &CatalogSource) -> Result<CatalogIndex> {
    debug!(?source, "resolving catalog");
    match source {
        CatalogSource::Builtin => CatalogIndex::builtin(),
        CatalogSource::File(path) => CatalogIndex::load(path)
            .with_context(|| format!("loading catalog from {}", path.display())),
    }
}
