//! # Schema Verification
//!
//! Static, purely structural checks that a constructed schema obeys the
//! JDDF well-formedness rules. Verification never mutates its input and is
//! safe to call concurrently on distinct schemas.
//!
//! ## Rules
//!
//! Checked depth-first; the first violation found is returned.
//!
//! 1. `definitions` appears only on the root.
//! 2. `ref` names an entry in the root's `definitions`.
//! 3. `enum` has no repeated values.
//! 4. `properties` and `optionalProperties` share no key.
//! 5. Every discriminator mapping value is in properties form and does
//!    not declare the tag as a required or optional property.
//!
//! Children of every form are verified against the same root. The
//! one-form-per-node rule is enforced by construction (see `schema`).
//!
//! Reference cycles are *not* rejected here: a recursive `ref` is legal
//! (tree-shaped data needs it). The validator's depth bound makes cycles
//! safe to evaluate.

use std::collections::HashSet;
use std::ops::Deref;

use jddf_core::{to_pointer, SchemaInvalid};

use crate::schema::{Form, Schema, SchemaMap};

/// A schema that has passed [`verify`].
///
/// The validator accepts only this type, so an unverified schema can never
/// reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedSchema(Schema);

impl VerifiedSchema {
    /// Borrow the underlying schema.
    pub fn as_schema(&self) -> &Schema {
        &self.0
    }

    /// Consume the wrapper and return the schema.
    pub fn into_inner(self) -> Schema {
        self.0
    }
}

impl Deref for VerifiedSchema {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.0
    }
}

impl AsRef<Schema> for VerifiedSchema {
    fn as_ref(&self) -> &Schema {
        &self.0
    }
}

/// Verify `schema` and wrap it as a [`VerifiedSchema`].
///
/// # Errors
///
/// Returns the first [`SchemaInvalid`] found in a depth-first walk.
pub fn verify(schema: Schema) -> Result<VerifiedSchema, SchemaInvalid> {
    schema.check()?;
    tracing::debug!(
        form = %schema.form_kind(),
        definitions = schema.definitions.as_ref().map_or(0, SchemaMap::len),
        "schema verified"
    );
    Ok(VerifiedSchema(schema))
}

impl Schema {
    /// Verify this schema as a root. See [`verify`].
    pub fn verify(self) -> Result<VerifiedSchema, SchemaInvalid> {
        verify(self)
    }

    /// Run the verification walk without taking ownership.
    pub fn check(&self) -> Result<(), SchemaInvalid> {
        let mut walk = Walk {
            root: self,
            path: Vec::new(),
        };
        walk.visit(self, true)
    }
}

struct Walk<'a> {
    root: &'a Schema,
    path: Vec<String>,
}

impl<'a> Walk<'a> {
    fn pointer(&self) -> String {
        to_pointer(self.path.as_slice())
    }

    fn visit(&mut self, schema: &'a Schema, is_root: bool) -> Result<(), SchemaInvalid> {
        if let Some(definitions) = &schema.definitions {
            if !is_root {
                return Err(SchemaInvalid::DefinitionsBelowRoot {
                    path: self.pointer(),
                });
            }
            self.visit_members("definitions", definitions)?;
        }

        match &schema.form {
            Form::Empty | Form::Type(_) => Ok(()),
            Form::Ref(name) => {
                if self.root.definition(name).is_none() {
                    return Err(SchemaInvalid::MissingDefinition {
                        path: self.pointer(),
                        name: name.clone(),
                    });
                }
                Ok(())
            }
            Form::Enum(values) => {
                let mut seen = HashSet::new();
                match values.iter().find(|v| !seen.insert(*v)) {
                    Some(value) => Err(SchemaInvalid::DuplicateEnumValue {
                        path: self.pointer(),
                        value: value.clone(),
                    }),
                    None => Ok(()),
                }
            }
            Form::Elements(inner) => self.visit_child("elements", inner),
            Form::Values(inner) => self.visit_child("values", inner),
            Form::Properties(props) => {
                if let (Some(required), Some(optional)) = (&props.required, &props.optional) {
                    if let Some(key) = required.keys().find(|k| optional.contains_key(k)) {
                        return Err(SchemaInvalid::SharedPropertyKey {
                            path: self.pointer(),
                            key: key.clone(),
                        });
                    }
                }
                if let Some(required) = &props.required {
                    self.visit_members("properties", required)?;
                }
                if let Some(optional) = &props.optional {
                    self.visit_members("optionalProperties", optional)?;
                }
                Ok(())
            }
            Form::Discriminator(discriminator) => {
                self.path.push("discriminator".to_string());
                self.visit_members("mapping", &discriminator.mapping)?;
                self.path.pop();

                for (tag_value, variant) in discriminator.mapping.iter() {
                    let Form::Properties(props) = &variant.form else {
                        return Err(SchemaInvalid::MappingNotProperties {
                            path: self.pointer(),
                            tag_value: tag_value.clone(),
                            form: variant.form_kind(),
                        });
                    };
                    if props.declares(&discriminator.tag) {
                        return Err(SchemaInvalid::MappingRedeclaresTag {
                            path: self.pointer(),
                            tag_value: tag_value.clone(),
                            tag: discriminator.tag.clone(),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    fn visit_child(&mut self, token: &str, child: &'a Schema) -> Result<(), SchemaInvalid> {
        self.path.push(token.to_string());
        self.visit(child, false)?;
        self.path.pop();
        Ok(())
    }

    fn visit_members(&mut self, token: &str, members: &'a SchemaMap) -> Result<(), SchemaInvalid> {
        self.path.push(token.to_string());
        for (name, member) in members.iter() {
            self.path.push(name.clone());
            self.visit(member, false)?;
            self.path.pop();
        }
        self.path.pop();
        Ok(())
    }
}
