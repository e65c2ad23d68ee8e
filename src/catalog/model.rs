//! Deserializable representation of `catalog/demons.json`.
//!
//! The types mirror the catalog schema so the filter engine and renderers can
//! work with typed records instead of raw JSON. Use `CatalogIndex` for
//! validation and id lookup; use these structs when the raw document shape is
//! required.

use crate::catalog::identity::{CatalogKey, DemonId, DemonType};
use crate::tier::{Tier, danger_tier, power_tier};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Catalog shipped with the binary.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../catalog/demons.json");

/// Full demon catalog as stored on disk.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DemonCatalog {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    /// Selector order for the type filter.
    pub types: Vec<DemonType>,
    pub demons: Vec<Demon>,
}

/// Identity and display metadata for a catalog snapshot.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// One catalog record. Read-only once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Demon {
    pub id: DemonId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DemonType,
    pub power: u8,
    pub danger: u8,
    pub price: u64,
    pub ability: String,
    pub weakness: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Demon {
    pub fn power_tier(&self) -> Result<Tier> {
        power_tier(self.power).with_context(|| format!("demon {} ({})", self.id, self.name))
    }

    pub fn danger_tier(&self) -> Result<Tier> {
        danger_tier(self.danger).with_context(|| format!("demon {} ({})", self.id, self.name))
    }
}

fn default_currency() -> String {
    "¥".to_string()
}
