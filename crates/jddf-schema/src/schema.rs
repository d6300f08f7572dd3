//! # Schema Model
//!
//! In-memory representation of a JDDF schema, built once from a generic
//! JSON value and immutable afterwards.
//!
//! ## Representation
//!
//! Every node carries exactly one [`Form`], a tagged variant holding only
//! the fields that form needs. "Exactly one form per node" is therefore a
//! property of the type rather than something later stages re-check. A
//! node whose JSON populates the fields of two forms is rejected during
//! construction with [`SchemaInvalid::MultipleForms`].
//!
//! `definitions` is kept on every node so that the verifier can reject it
//! below the root; only the root's table is ever consulted for `ref`.
//!
//! ## Parsing Rules
//!
//! - Recognized fields are type-checked one by one. A field whose value is
//!   JSON `null` counts as absent.
//! - Unrecognized fields are ignored.
//! - Member maps (`definitions`, `properties`, `optionalProperties`,
//!   discriminator `mapping`) keep the key order of the source document.
//!   Requires `serde_json`'s `preserve_order` feature, enabled workspace-wide.
//! - `additionalProperties` is only meaningful in properties form and is
//!   dropped on nodes of any other form.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use jddf_core::{to_pointer, FormKind, MalformedSchema, PrimitiveType, SchemaError, SchemaInvalid};

use crate::discriminator::Discriminator;

/// An insertion-ordered map from member name to schema.
///
/// Lookups are constant time; iteration follows source order. Two maps
/// are equal only if they hold the same members in the same order.
#[derive(Debug, Clone, Default)]
pub struct SchemaMap {
    entries: IndexMap<String, Schema>,
}

impl SchemaMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.entries.get(name)
    }

    /// Returns true if a member with this name exists.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate members in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.entries.iter()
    }

    /// Iterate member names in source order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Add a member, replacing any existing member of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) {
        self.entries.insert(name.into(), schema);
    }
}

impl PartialEq for SchemaMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl FromIterator<(String, Schema)> for SchemaMap {
    fn from_iter<I: IntoIterator<Item = (String, Schema)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The properties form: an object with declared members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    /// Members that must be present (`properties`).
    pub required: Option<SchemaMap>,
    /// Members that may be present (`optionalProperties`).
    pub optional: Option<SchemaMap>,
    /// Whether undeclared members are tolerated (`additionalProperties`).
    pub additional: bool,
}

impl Properties {
    /// Returns true if `name` is declared as required or optional.
    pub fn declares(&self, name: &str) -> bool {
        self.required.as_ref().is_some_and(|m| m.contains_key(name))
            || self.optional.as_ref().is_some_and(|m| m.contains_key(name))
    }
}

/// The active form of a schema node, with that form's payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Form {
    /// Accepts any instance.
    #[default]
    Empty,
    /// Name of a root-level definition.
    Ref(String),
    /// A primitive type.
    Type(PrimitiveType),
    /// Allowed string values, in source order.
    Enum(Vec<String>),
    /// Schema for every array element.
    Elements(Box<Schema>),
    /// Declared object members.
    Properties(Properties),
    /// Schema for every object value.
    Values(Box<Schema>),
    /// Tagged union of properties-form variants.
    Discriminator(Discriminator),
}

impl Form {
    /// Returns the payload-free name of this form.
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Empty => FormKind::Empty,
            Self::Ref(_) => FormKind::Ref,
            Self::Type(_) => FormKind::Type,
            Self::Enum(_) => FormKind::Enum,
            Self::Elements(_) => FormKind::Elements,
            Self::Properties(_) => FormKind::Properties,
            Self::Values(_) => FormKind::Values,
            Self::Discriminator(_) => FormKind::Discriminator,
        }
    }
}

/// A node in a schema tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Named reusable schemas. Legal only on the root.
    pub definitions: Option<SchemaMap>,
    /// The node's form.
    pub form: Form,
}

impl Schema {
    /// A schema in empty form, accepting everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A schema with the given form and no definitions.
    pub fn with_form(form: Form) -> Self {
        Self {
            definitions: None,
            form,
        }
    }

    /// Build a schema tree from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Malformed`] if a recognized field has the
    /// wrong JSON type or value, and [`SchemaError::Invalid`] if a node
    /// populates the fields of more than one form.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        Self::parse(value, &mut Vec::new())
    }

    /// Returns the form this node is in.
    pub fn form_kind(&self) -> FormKind {
        self.form.kind()
    }

    /// Look up a definition on this node by name.
    pub fn definition(&self, name: &str) -> Option<&Schema> {
        self.definitions.as_ref().and_then(|defs| defs.get(name))
    }

    /// Parse a node at `path`, which is restored before returning `Ok`.
    pub(crate) fn parse(value: &Value, path: &mut Vec<String>) -> Result<Self, SchemaError> {
        let object = value.as_object().ok_or_else(|| MalformedSchema::NotAnObject {
            path: to_pointer(path.as_slice()),
        })?;

        let definitions = match field(object, "definitions") {
            Some(v) => Some(parse_members(v, "definitions", path)?),
            None => None,
        };

        let reference = match field(object, "ref") {
            Some(v) => Some(
                v.as_str()
                    .ok_or_else(|| wrong_type(path, "ref", "a string"))?
                    .to_string(),
            ),
            None => None,
        };

        let primitive = match field(object, "type") {
            Some(v) => {
                let name = v
                    .as_str()
                    .ok_or_else(|| wrong_type(path, "type", "a string"))?;
                let parsed: PrimitiveType =
                    name.parse().map_err(|_| MalformedSchema::UnknownType {
                        path: to_pointer(path.as_slice()),
                        value: name.to_string(),
                    })?;
                Some(parsed)
            }
            None => None,
        };

        let variants = match field(object, "enum") {
            Some(v) => Some(parse_enum(v, path)?),
            None => None,
        };

        let elements = match field(object, "elements") {
            Some(v) => Some(parse_child(v, "elements", path)?),
            None => None,
        };

        let required = match field(object, "properties") {
            Some(v) => Some(parse_members(v, "properties", path)?),
            None => None,
        };

        let optional = match field(object, "optionalProperties") {
            Some(v) => Some(parse_members(v, "optionalProperties", path)?),
            None => None,
        };

        let additional = match field(object, "additionalProperties") {
            Some(v) => Some(
                v.as_bool()
                    .ok_or_else(|| wrong_type(path, "additionalProperties", "a boolean"))?,
            ),
            None => None,
        };

        let values = match field(object, "values") {
            Some(v) => Some(parse_child(v, "values", path)?),
            None => None,
        };

        let discriminator = match field(object, "discriminator") {
            Some(v) => {
                path.push("discriminator".to_string());
                let parsed = Discriminator::parse(v, path)?;
                path.pop();
                Some(parsed)
            }
            None => None,
        };

        // Candidate forms in precedence order.
        let mut forms = Vec::with_capacity(1);
        if let Some(name) = reference {
            forms.push(Form::Ref(name));
        }
        if let Some(t) = primitive {
            forms.push(Form::Type(t));
        }
        if let Some(v) = variants {
            forms.push(Form::Enum(v));
        }
        if let Some(s) = elements {
            forms.push(Form::Elements(Box::new(s)));
        }
        if required.is_some() || optional.is_some() {
            forms.push(Form::Properties(Properties {
                required,
                optional,
                additional: additional.unwrap_or(false),
            }));
        }
        if let Some(s) = values {
            forms.push(Form::Values(Box::new(s)));
        }
        if let Some(d) = discriminator {
            forms.push(Form::Discriminator(d));
        }

        if let [first, second, ..] = forms.as_slice() {
            return Err(SchemaInvalid::MultipleForms {
                path: to_pointer(path.as_slice()),
                first: first.kind(),
                second: second.kind(),
            }
            .into());
        }

        Ok(Self {
            definitions,
            form: forms.pop().unwrap_or_default(),
        })
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

/// Returns a recognized field, treating JSON `null` as absent.
pub(crate) fn field<'v>(object: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
    object.get(name).filter(|v| !v.is_null())
}

pub(crate) fn wrong_type(path: &[String], field: &'static str, expected: &'static str) -> SchemaError {
    MalformedSchema::WrongType {
        path: to_pointer(path),
        field,
        expected,
    }
    .into()
}

fn parse_child(value: &Value, token: &str, path: &mut Vec<String>) -> Result<Schema, SchemaError> {
    path.push(token.to_string());
    let schema = Schema::parse(value, path)?;
    path.pop();
    Ok(schema)
}

/// Parse an object of named schemas found under field `token`.
pub(crate) fn parse_members(
    value: &Value,
    token: &'static str,
    path: &mut Vec<String>,
) -> Result<SchemaMap, SchemaError> {
    let object = value
        .as_object()
        .ok_or_else(|| wrong_type(path, token, "an object"))?;

    path.push(token.to_string());
    let mut members = SchemaMap::with_capacity(object.len());
    for (name, member) in object {
        path.push(name.clone());
        let schema = Schema::parse(member, path)?;
        path.pop();
        members.insert(name.clone(), schema);
    }
    path.pop();
    Ok(members)
}

fn parse_enum(value: &Value, path: &[String]) -> Result<Vec<String>, SchemaError> {
    let items = value
        .as_array()
        .ok_or_else(|| wrong_type(path, "enum", "a list of strings"))?;

    if items.is_empty() {
        return Err(MalformedSchema::EmptyEnum {
            path: to_pointer(path),
        }
        .into());
    }

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_type(path, "enum", "a list of strings"))
        })
        .collect()
}
