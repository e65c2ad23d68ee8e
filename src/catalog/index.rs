//! Indexed view of a demon catalog instance.
//!
//! The index enforces the expected catalog schema version and provides lookup
//! by demon id while keeping the catalog's original order for filtering. It is
//! strict about duplicates, undeclared types, and out-of-domain ratings so the
//! filter engine and classifiers only ever see well-formed records.

use crate::catalog::model::{BUILTIN_CATALOG_JSON, CatalogMetadata, Demon, DemonCatalog};
use crate::catalog::{CatalogKey, DemonId, DemonType};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use crate::tier::{DANGER_DOMAIN, POWER_DOMAIN};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const SUPPORTED_SCHEMA_VERSION: &str = "demon_catalog_v1";

/// Demon catalog plus a derived index keyed by demon id.
#[derive(Debug)]
pub struct CatalogIndex {
    catalog: DemonCatalog,
    by_id: BTreeMap<DemonId, usize>,
}

impl CatalogIndex {
    /// Load and validate the catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG_JSON, "builtin catalog")
    }

    /// Load and validate a catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_json(&data, &path.display().to_string())
    }

    /// Validate a catalog document and build the index.
    ///
    /// `origin` only labels error messages and logs.
    pub fn from_json(data: &str, origin: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing catalog {origin}"))?;
        validate_against_schema(&value, origin)?;

        let catalog: DemonCatalog =
            serde_json::from_value(value).with_context(|| format!("loading catalog {origin}"))?;
        validate_schema_version(&catalog.schema_version)?;
        validate_catalog_metadata(&catalog.catalog)?;
        let by_id = build_index(&catalog)?;
        info!(
            origin,
            key = %catalog.catalog.key.0,
            demons = catalog.demons.len(),
            "catalog loaded"
        );
        Ok(Self { catalog, by_id })
    }

    /// The catalog key declared in the loaded document.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog.catalog.key
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.catalog.catalog
    }

    /// All demons in catalog order.
    pub fn demons(&self) -> &[Demon] {
        &self.catalog.demons
    }

    /// Declared types in selector order.
    pub fn types(&self) -> &[DemonType] {
        &self.catalog.types
    }

    /// Resolve a demon by id.
    ///
    /// Returns `None` instead of erroring; callers surface errors with the CLI
    /// context that referenced the missing id.
    pub fn demon(&self, id: DemonId) -> Option<&Demon> {
        self.by_id.get(&id).map(|&pos| &self.catalog.demons[pos])
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    if schema_version != SUPPORTED_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported (expected {})",
            schema_version,
            SUPPORTED_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    validate_catalog_key(&meta.key)?;
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    Ok(())
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    Ok(())
}

fn build_index(catalog: &DemonCatalog) -> Result<BTreeMap<DemonId, usize>> {
    if catalog.types.is_empty() {
        bail!("catalog must declare at least one type");
    }
    let mut declared: BTreeSet<&str> = BTreeSet::new();
    for kind in &catalog.types {
        if kind.as_str().trim().is_empty() {
            bail!("types must not contain empty entries");
        }
        if !declared.insert(kind.as_str()) {
            bail!("duplicate type {}", kind);
        }
    }

    let mut map = BTreeMap::new();
    for (pos, demon) in catalog.demons.iter().enumerate() {
        if demon.name.trim().is_empty() {
            bail!("demon {} has an empty name", demon.id);
        }
        if map.contains_key(&demon.id) {
            bail!("duplicate demon id {}", demon.id);
        }
        if !declared.contains(demon.kind.as_str()) {
            bail!(
                "demon {} references undeclared type {}",
                demon.id,
                demon.kind
            );
        }
        if !POWER_DOMAIN.contains(&demon.power) {
            bail!(
                "demon {} has power {} outside {}..={}",
                demon.id,
                demon.power,
                POWER_DOMAIN.start(),
                POWER_DOMAIN.end()
            );
        }
        if !DANGER_DOMAIN.contains(&demon.danger) {
            bail!(
                "demon {} has danger {} outside {}..={}",
                demon.id,
                demon.danger,
                DANGER_DOMAIN.start(),
                DANGER_DOMAIN.end()
            );
        }
        map.insert(demon.id, pos);
    }
    Ok(map)
}

fn validate_against_schema(catalog_value: &Value, origin: &str) -> Result<()> {
    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let allowed = BTreeSet::from([SUPPORTED_SCHEMA_VERSION.to_string()]);
    let schema = load_json_schema(SchemaLoadOptions {
        allowed_versions: Some(&allowed),
        expected_version: Some(catalog_version),
        ..Default::default()
    })
    .context("loading catalog schema")?;
    debug!(schema_version = %schema.schema_version, origin, "validating catalog");

    if let Err(errors) = schema.compiled.validate(catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("demon catalog {origin} failed schema validation:\n{details}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(demons: Value) -> String {
        json!({
            "schema_version": "demon_catalog_v1",
            "catalog": {"key": "test_v1", "title": "Тест"},
            "types": ["Животный", "Предметный"],
            "demons": demons
        })
        .to_string()
    }

    fn demon(id: u32, name: &str, kind: &str, power: u8, danger: u8) -> Value {
        json!({
            "id": id,
            "name": name,
            "type": kind,
            "power": power,
            "danger": danger,
            "price": 1000,
            "ability": "a",
            "weakness": "w"
        })
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let index = CatalogIndex::builtin().expect("builtin catalog validates");
        assert_eq!(index.key().0, "black_deal_v1");
        assert_eq!(index.demons().len(), 25);
        assert_eq!(index.demon(DemonId(7)).map(|d| d.name.as_str()), Some("Демон-Ножниц"));
        assert!(index.demon(DemonId(99)).is_none());
    }

    #[test]
    fn index_preserves_catalog_order() {
        let data = sample(json!([
            demon(9, "Демон-Б", "Животный", 1, 1),
            demon(2, "Демон-А", "Предметный", 2, 2),
        ]));
        let index = CatalogIndex::from_json(&data, "fixture").unwrap();
        let ids: Vec<u32> = index.demons().iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![9, 2]);
        assert_eq!(index.demon(DemonId(2)).unwrap().name, "Демон-А");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let data = sample(json!([
            demon(1, "Демон-А", "Животный", 1, 1),
            demon(1, "Демон-Б", "Животный", 1, 1),
        ]));
        let err = CatalogIndex::from_json(&data, "fixture").expect_err("duplicate id");
        assert!(err.to_string().contains("duplicate demon id 1"), "{err:#}");
    }

    #[test]
    fn rejects_undeclared_type() {
        let data = sample(json!([demon(1, "Демон-А", "Эфемерный", 1, 1)]));
        let err = CatalogIndex::from_json(&data, "fixture").expect_err("undeclared type");
        assert!(err.to_string().contains("undeclared type Эфемерный"), "{err:#}");
    }

    #[test]
    fn rejects_out_of_domain_rating_via_schema() {
        let data = sample(json!([demon(1, "Демон-А", "Животный", 6, 1)]));
        let err = CatalogIndex::from_json(&data, "fixture").expect_err("power 6");
        assert!(err.to_string().contains("failed schema validation"), "{err:#}");
    }

    #[test]
    fn rejects_blank_name() {
        let data = sample(json!([demon(1, "  ", "Животный", 1, 1)]));
        let err = CatalogIndex::from_json(&data, "fixture").expect_err("blank name");
        assert!(err.to_string().contains("empty name"), "{err:#}");
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let data = json!({
            "schema_version": "demon_catalog_v2",
            "catalog": {"key": "test_v1", "title": "Тест"},
            "types": ["Животный"],
            "demons": [demon(1, "Демон-А", "Животный", 1, 1)]
        })
        .to_string();
        let err = CatalogIndex::from_json(&data, "fixture").expect_err("v2 unsupported");
        assert!(format!("{err:#}").contains("demon_catalog_v2"), "{err:#}");
    }

    #[test]
    fn accepts_empty_demon_list() {
        let data = sample(json!([]));
        let index = CatalogIndex::from_json(&data, "fixture").expect("empty catalog loads");
        assert!(index.demons().is_empty());
        assert_eq!(index.types().len(), 2);
        assert!(index.demon(DemonId(1)).is_none());
    }
}
