//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout JDDF. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Four outcomes are kept apart because callers handle them differently:
//!
//! - [`MalformedSchema`] — construction time. A schema field has the wrong
//!   JSON type or an out-of-range value. No partial schema is returned.
//! - [`SchemaInvalid`] — verification time. The schema is well-typed but
//!   breaks a structural rule. Validation cannot proceed.
//! - [`MaxDepthExceeded`] — validation time. Reference recursion hit the
//!   configured bound; the run aborts with no partial error list.
//! - Validation errors proper are *output*, not failures, and live in
//!   `jddf-schema` as `ValidationError`.
//!
//! Every schema-side error carries the JSON Pointer of the offending schema
//! node so that operators can locate the defect in the source document.

use thiserror::Error;

use crate::form::FormKind;

/// Error returned by schema construction.
///
/// Construction can fail for type reasons ([`MalformedSchema`]) and for the
/// one structural rule that the tagged schema representation cannot hold:
/// two forms populated on the same node ([`SchemaInvalid::MultipleForms`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field has the wrong JSON type or value.
    #[error(transparent)]
    Malformed(#[from] MalformedSchema),

    /// A structural rule was broken while building the node.
    #[error(transparent)]
    Invalid(#[from] SchemaInvalid),
}

/// A schema field has the wrong JSON type or an out-of-range value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedSchema {
    /// A schema node is not a JSON object.
    #[error("schema at '{path}' must be an object")]
    NotAnObject {
        /// JSON Pointer of the node.
        path: String,
    },

    /// A recognized field has the wrong JSON type.
    #[error("field '{field}' at '{path}' must be {expected}")]
    WrongType {
        /// JSON Pointer of the node.
        path: String,
        /// Name of the field.
        field: &'static str,
        /// Human-readable description of the expected JSON type.
        expected: &'static str,
    },

    /// `type` is not one of the primitive type names.
    #[error("unknown type {value:?} at '{path}'")]
    UnknownType {
        /// JSON Pointer of the node.
        path: String,
        /// The rejected value.
        value: String,
    },

    /// `enum` is an empty list.
    #[error("enum at '{path}' must not be empty")]
    EmptyEnum {
        /// JSON Pointer of the node.
        path: String,
    },

    /// A field required by its container is absent.
    #[error("field '{field}' at '{path}' is required")]
    MissingField {
        /// JSON Pointer of the container.
        path: String,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// A well-typed schema violates a structural rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaInvalid {
    /// `definitions` appears on a node other than the root.
    #[error("definitions at '{path}' must only appear at the root")]
    DefinitionsBelowRoot {
        /// JSON Pointer of the node.
        path: String,
    },

    /// Fields of two different forms are populated on one node.
    #[error("schema at '{path}' mixes {first} and {second} forms")]
    MultipleForms {
        /// JSON Pointer of the node.
        path: String,
        /// Form with the higher precedence.
        first: FormKind,
        /// Second populated form.
        second: FormKind,
    },

    /// `ref` names a definition that the root does not have.
    #[error("ref at '{path}' names missing definition {name:?}")]
    MissingDefinition {
        /// JSON Pointer of the node.
        path: String,
        /// The referenced name.
        name: String,
    },

    /// `enum` lists a value more than once.
    #[error("enum at '{path}' repeats value {value:?}")]
    DuplicateEnumValue {
        /// JSON Pointer of the node.
        path: String,
        /// The repeated value.
        value: String,
    },

    /// `properties` and `optionalProperties` share a key.
    #[error("properties and optionalProperties at '{path}' share key {key:?}")]
    SharedPropertyKey {
        /// JSON Pointer of the node.
        path: String,
        /// The shared key.
        key: String,
    },

    /// A discriminator mapping value is not in properties form.
    #[error("discriminator mapping {tag_value:?} at '{path}' is of {form} form, expected properties")]
    MappingNotProperties {
        /// JSON Pointer of the discriminator node.
        path: String,
        /// Mapping key of the offending variant.
        tag_value: String,
        /// Form the variant actually has.
        form: FormKind,
    },

    /// A discriminator mapping value declares the tag as a property.
    #[error("discriminator mapping {tag_value:?} at '{path}' redeclares tag {tag:?}")]
    MappingRedeclaresTag {
        /// JSON Pointer of the discriminator node.
        path: String,
        /// Mapping key of the offending variant.
        tag_value: String,
        /// The discriminator tag.
        tag: String,
    },
}

impl SchemaInvalid {
    /// JSON Pointer of the schema node the violation was found at.
    pub fn path(&self) -> &str {
        match self {
            Self::DefinitionsBelowRoot { path }
            | Self::MultipleForms { path, .. }
            | Self::MissingDefinition { path, .. }
            | Self::DuplicateEnumValue { path, .. }
            | Self::SharedPropertyKey { path, .. }
            | Self::MappingNotProperties { path, .. }
            | Self::MappingRedeclaresTag { path, .. } => path,
        }
    }
}

/// Validation followed `ref`s deeper than the configured bound.
///
/// Signals that the schema/config combination is unsafe to evaluate (most
/// likely a reference cycle), not that the instance is invalid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("max depth of {max_depth} exceeded during validation")]
pub struct MaxDepthExceeded {
    /// The configured bound that was hit.
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_is_transparent() {
        let err = SchemaError::from(MalformedSchema::EmptyEnum {
            path: "/enum".to_string(),
        });
        assert!(matches!(err, SchemaError::Malformed(MalformedSchema::EmptyEnum { .. })));
        assert_eq!(err.to_string(), "enum at '/enum' must not be empty");

        let err = SchemaError::from(SchemaInvalid::MultipleForms {
            path: String::new(),
            first: FormKind::Ref,
            second: FormKind::Type,
        });
        assert!(matches!(err, SchemaError::Invalid(SchemaInvalid::MultipleForms { .. })));
    }

    #[test]
    fn test_display_includes_path() {
        let err = SchemaInvalid::MissingDefinition {
            path: "/properties/a".to_string(),
            name: "missing".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/properties/a"));
        assert!(msg.contains("missing"));
        assert_eq!(err.path(), "/properties/a");
    }

    #[test]
    fn test_multiple_forms_names_both_forms() {
        let err = SchemaInvalid::MultipleForms {
            path: String::new(),
            first: FormKind::Elements,
            second: FormKind::Values,
        };
        assert_eq!(err.to_string(), "schema at '' mixes elements and values forms");
    }

    #[test]
    fn test_max_depth_display() {
        let err = MaxDepthExceeded { max_depth: 3 };
        assert_eq!(err.to_string(), "max depth of 3 exceeded during validation");
    }
}
