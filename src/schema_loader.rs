//! JSON Schema loading for catalog documents.
//!
//! The catalog schema ships inside the binary. Loading checks the schema's
//! `schema_version` const against the caller's allowed set and the version the
//! document claims, then compiles a validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;

pub(crate) const CATALOG_SCHEMA_JSON: &str =
    include_str!("../schema/demon_catalog.schema.json");

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how the schema is checked before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Raw schema text; defaults to the embedded catalog schema.
    pub schema_text: &'a str,
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Version the validated document declares; must match the schema const.
    pub expected_version: Option<&'a str>,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            schema_text: CATALOG_SCHEMA_JSON,
            schema_version_pointer: "/properties/schema_version/const",
            expected_version: None,
            allowed_versions: None,
        }
    }
}

pub(crate) fn load_json_schema(options: SchemaLoadOptions<'_>) -> Result<SchemaLoadResult> {
    let schema_value: Value =
        serde_json::from_str(options.schema_text).context("parsing catalog schema")?;

    let schema_version = extract_schema_version(&schema_value, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema missing schema_version const"))?;

    if let Some(expected) = options.expected_version {
        if let Some(allowed) = options.allowed_versions {
            if !allowed.contains(expected) {
                bail!(
                    "schema_version '{}' not in allowed set {:?}",
                    expected,
                    allowed
                );
            }
        }
        if expected != schema_version {
            bail!(
                "document schema_version '{}' does not match schema '{}'",
                expected,
                schema_version
            );
        }
    }

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled = JSONSchema::compile(&schema_value)
        .map_err(|err| anyhow!("compiling catalog schema: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_schema_compiles() {
        let loaded = load_json_schema(SchemaLoadOptions::default()).unwrap();
        assert_eq!(loaded.schema_version, "demon_catalog_v1");
        assert!(loaded.compiled.is_valid(&json!({
            "schema_version": "demon_catalog_v1",
            "catalog": {"key": "k", "title": "t"},
            "types": ["Животный"],
            "demons": []
        })));
    }

    #[test]
    fn rejects_version_outside_allowed_set() {
        let allowed = BTreeSet::from(["demon_catalog_v0".to_string()]);
        let err = load_json_schema(SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        })
        .err()
        .expect("v1 not allowed");
        assert!(err.to_string().contains("not in allowed set"), "{err}");
    }

    #[test]
    fn rejects_schema_without_version_const() {
        let err = load_json_schema(SchemaLoadOptions {
            schema_text: r#"{"type": "object"}"#,
            ..Default::default()
        })
        .err()
        .expect("missing const");
        assert!(err.to_string().contains("schema_version const"), "{err}");
    }
}
