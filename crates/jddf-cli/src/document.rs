//! # Document Loading
//!
//! Reads schema and instance documents from disk as generic JSON values.
//! Files ending in `.yaml` or `.yml` are parsed as YAML and converted to
//! the equivalent JSON tree; everything else is parsed as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use jddf_core::to_pointer;
use jddf_schema::{verify, Schema, VerifiedSchema};

/// Load a JSON or YAML document as a JSON value.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", path.display()))?;
            yaml_to_json(&yaml, &mut Vec::new())
                .with_context(|| format!("cannot convert YAML in {} to JSON", path.display()))
        }
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display())),
    }
}

/// Load, construct and verify a schema document.
pub fn load_schema(path: &Path) -> Result<VerifiedSchema> {
    let value = load_document(path)?;
    let schema = Schema::from_json(&value)
        .with_context(|| format!("cannot build schema from {}", path.display()))?;
    let verified =
        verify(schema).with_context(|| format!("schema {} is invalid", path.display()))?;
    tracing::info!(path = %path.display(), form = %verified.form_kind(), "loaded schema");
    Ok(verified)
}

/// Convert a YAML tree to the JSON tree a JSON document with the same
/// content would decode to.
///
/// Mapping order is kept. Scalar keys are stringified, since JDDF member
/// names are strings; YAML tags are dropped. `path` tracks the position
/// for error messages and is restored on success.
fn yaml_to_json(yaml: &serde_yaml::Value, path: &mut Vec<String>) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                let Some(number) = serde_json::Number::from_f64(f) else {
                    bail!("number {n} at '{}' has no JSON form", to_pointer(path.as_slice()));
                };
                Value::Number(number)
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                array.push(yaml_to_json(item, path)?);
                path.pop();
            }
            Value::Array(array)
        }
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, item) in mapping {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => bail!(
                        "mapping key {other:?} at '{}' is not a scalar",
                        to_pointer(path.as_slice())
                    ),
                };
                path.push(key);
                let converted = yaml_to_json(item, path)?;
                if let Some(key) = path.pop() {
                    object.insert(key, converted);
                }
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value, path)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jddf_core::FormKind;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_document() {
        let file = write_temp(".json", r#"{"b": 1, "a": [true, null]}"#);
        let value = load_document(file.path()).unwrap();
        assert_eq!(value["a"][0], true);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_load_yaml_document_preserves_order() {
        let file = write_temp(
            ".yaml",
            "properties:\n  zeta:\n    type: string\n  alpha:\n    type: uint8\n",
        );
        let value = load_document(file.path()).unwrap();
        let keys: Vec<&String> = value["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(value["properties"]["alpha"]["type"], "uint8");
    }

    #[test]
    fn test_yaml_scalars() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("count: 42\nratio: 0.5\nenabled: true\n1: x\n").unwrap();
        let json = yaml_to_json(&yaml, &mut Vec::new()).unwrap();
        assert_eq!(json["count"], 42);
        assert_eq!(json["ratio"], 0.5);
        assert_eq!(json["enabled"], true);
        assert_eq!(json["1"], "x");
    }

    #[test]
    fn test_yaml_non_scalar_key_reports_location() {
        let file = write_temp(".yaml", "properties:\n  a:\n    ? [x, y]\n    : 1\n");
        let err = load_document(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("cannot convert YAML"), "{msg}");
        assert!(msg.contains("'/properties/a'"), "{msg}");
    }

    #[test]
    fn test_yaml_special_floats_rejected() {
        let file = write_temp(".yml", "values: [1, .nan]\n");
        let err = load_document(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("at '/values/1'"));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let file = write_temp(".json", "{not json");
        let err = load_document(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid JSON"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_document(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_load_schema_verifies() {
        let file = write_temp(".json", r#"{"elements": {"type": "string"}}"#);
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.form_kind(), FormKind::Elements);

        let file = write_temp(".json", r#"{"ref": "missing"}"#);
        let err = load_schema(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("missing definition"));
    }
}
