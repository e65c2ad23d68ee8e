//! Demon catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/demons.json` so the
//! browser can load a validated snapshot with consistent identifiers. Types
//! here mirror the schema fields; callers use `CatalogIndex` for ordered access
//! and id lookups.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, DemonId, DemonType};
pub use index::CatalogIndex;
pub use model::{BUILTIN_CATALOG_JSON, CatalogMetadata, Demon, DemonCatalog};
