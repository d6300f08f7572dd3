//! # Discriminator Model
//!
//! The discriminator form selects one of several variant schemas by the
//! string value of a tag property on the instance. Each variant must be in
//! properties form and must not redeclare the tag; both rules are enforced
//! by the verifier, not here.

use serde_json::Value;

use jddf_core::{to_pointer, MalformedSchema, SchemaError};

use crate::schema::{field, parse_members, wrong_type, SchemaMap};

/// A tag property name and the variant schema for each tag value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discriminator {
    /// Instance property holding the variant name.
    pub tag: String,
    /// Variant schemas keyed by tag value, in source order.
    pub mapping: SchemaMap,
}

impl Discriminator {
    /// Parse the value of a `discriminator` field. `path` points at that field.
    pub(crate) fn parse(value: &Value, path: &mut Vec<String>) -> Result<Self, SchemaError> {
        let object = value.as_object().ok_or_else(|| MalformedSchema::NotAnObject {
            path: to_pointer(path.as_slice()),
        })?;

        let tag = field(object, "tag")
            .ok_or_else(|| MalformedSchema::MissingField {
                path: to_pointer(path.as_slice()),
                field: "tag",
            })?
            .as_str()
            .ok_or_else(|| wrong_type(path, "tag", "a string"))?
            .to_string();

        let mapping = field(object, "mapping").ok_or_else(|| MalformedSchema::MissingField {
            path: to_pointer(path.as_slice()),
            field: "mapping",
        })?;
        let mapping = parse_members(mapping, "mapping", path)?;

        Ok(Self { tag, mapping })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Form, Schema};
    use jddf_core::FormKind;
    use serde_json::json;

    #[test]
    fn test_parse_tag_and_mapping() {
        let schema = Schema::from_json(&json!({
            "discriminator": {
                "tag": "kind",
                "mapping": {
                    "b": {"properties": {}},
                    "a": {"optionalProperties": {}}
                }
            }
        }))
        .unwrap();

        let Form::Discriminator(d) = &schema.form else {
            panic!("expected discriminator form, got {:?}", schema.form);
        };
        assert_eq!(d.tag, "kind");
        let keys: Vec<&String> = d.mapping.keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(d.mapping.get("a").map(Schema::form_kind), Some(FormKind::Properties));
    }

    #[test]
    fn test_missing_tag() {
        let err = Schema::from_json(&json!({"discriminator": {"mapping": {}}})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Malformed(MalformedSchema::MissingField {
                path: "/discriminator".to_string(),
                field: "tag",
            })
        );
    }

    #[test]
    fn test_tag_must_be_string() {
        let err = Schema::from_json(&json!({"discriminator": {"tag": 1, "mapping": {}}}))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Malformed(MalformedSchema::WrongType { field: "tag", .. })
        ));
    }

    #[test]
    fn test_missing_mapping() {
        let err = Schema::from_json(&json!({"discriminator": {"tag": "t"}})).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Malformed(MalformedSchema::MissingField { field: "mapping", .. })
        ));
    }

    #[test]
    fn test_mapping_must_be_object() {
        let err = Schema::from_json(&json!({"discriminator": {"tag": "t", "mapping": []}}))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Malformed(MalformedSchema::WrongType { field: "mapping", .. })
        ));
    }

    #[test]
    fn test_discriminator_must_be_object() {
        let err = Schema::from_json(&json!({"discriminator": "t"})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Malformed(MalformedSchema::NotAnObject {
                path: "/discriminator".to_string(),
            })
        );
    }

    #[test]
    fn test_mapping_variant_error_path() {
        let err = Schema::from_json(&json!({
            "discriminator": {"tag": "t", "mapping": {"x": {"type": "nope"}}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Malformed(MalformedSchema::UnknownType { ref path, .. })
                if path == "/discriminator/mapping/x"
        ));
    }
}
