//! # Instance Validation
//!
//! Walks a verified schema alongside a JSON instance and reports every
//! place the instance fails to conform, as a list of [`ValidationError`]s.
//!
//! ## Determinism
//!
//! Independent JDDF implementations must agree on the exact error list, so
//! the traversal order is fixed: depth-first, `properties` then
//! `optionalProperties` in declaration order, then undeclared instance
//! members, array elements by index, object values in instance order.
//!
//! ## Schema Paths and `ref`
//!
//! Schema paths are tracked as a stack of frames, one per `ref` followed.
//! Crossing a `ref` opens a new frame seeded with `definitions/<name>`, so
//! an error inside a definition is reported relative to that definition,
//! not to the node that referenced it. Instance paths are never reset.
//!
//! ## Governors
//!
//! - `max_depth` bounds the number of open frames, the root frame
//!   included. Following a `ref` when that many frames are open aborts the
//!   run with [`MaxDepthExceeded`] and discards the partial error list.
//!   It is always enforced, since it is the only guard against recursive
//!   definitions; it defaults to [`DEFAULT_MAX_DEPTH`].
//! - `max_errors` stops the run as soon as that many errors have been
//!   collected and returns them. `0` disables it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use jddf_core::{to_pointer, MaxDepthExceeded};

use crate::schema::{Form, Schema};
use crate::verify::VerifiedSchema;

/// Default bound on nested `ref` frames.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Limits applied to a single validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum number of open `ref` frames. Values below 2 forbid
    /// following any `ref`.
    pub max_depth: usize,
    /// Stop after this many errors, `0` for no limit.
    pub max_errors: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_errors: 0,
        }
    }
}

impl ValidatorConfig {
    /// Return a copy with `max_depth` replaced.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Return a copy with `max_errors` replaced.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// A single place where an instance does not conform to its schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Tokens locating the offending value in the instance.
    pub instance_path: Vec<String>,
    /// Tokens locating the responsible schema node, relative to the
    /// innermost `ref` frame.
    pub schema_path: Vec<String>,
}

impl ValidationError {
    /// The instance path as a JSON Pointer.
    pub fn instance_pointer(&self) -> String {
        to_pointer(self.instance_path.as_slice())
    }

    /// The schema path as a JSON Pointer.
    pub fn schema_pointer(&self) -> String {
        to_pointer(self.schema_path.as_slice())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.instance_pointer();
        if instance.is_empty() {
            write!(f, "(root): schema {}", self.schema_pointer())
        } else {
            write!(f, "{instance}: schema {}", self.schema_pointer())
        }
    }
}

/// Validates instances against verified schemas.
///
/// Holds only configuration; every call builds its own run state, so one
/// `Validator` can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given limits.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the limits in use.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `instance` against `schema`.
    ///
    /// Returns the errors in traversal order; an empty list means the
    /// instance is valid.
    ///
    /// # Errors
    ///
    /// Returns [`MaxDepthExceeded`] if `ref` recursion reaches
    /// `max_depth`. No partial error list is returned in that case.
    pub fn validate(
        &self,
        schema: &VerifiedSchema,
        instance: &Value,
    ) -> Result<Vec<ValidationError>, MaxDepthExceeded> {
        let root = schema.as_schema();
        let mut vm = Vm::new(root, self.config);
        match vm.eval(root, instance, None) {
            Ok(()) | Err(Halt::MaxErrors) => {
                tracing::debug!(
                    errors = vm.errors.len(),
                    truncated = self.config.max_errors != 0
                        && vm.errors.len() >= self.config.max_errors,
                    "validation finished"
                );
                Ok(vm.errors)
            }
            Err(Halt::MaxDepth) => {
                tracing::warn!(
                    max_depth = self.config.max_depth,
                    "validation aborted: max depth exceeded"
                );
                Err(MaxDepthExceeded {
                    max_depth: self.config.max_depth,
                })
            }
        }
    }

    /// Returns true if `instance` conforms to `schema`.
    ///
    /// Stops at the first error regardless of the configured `max_errors`.
    ///
    /// # Errors
    ///
    /// Same as [`Validator::validate`].
    pub fn is_valid(&self, schema: &VerifiedSchema, instance: &Value) -> Result<bool, MaxDepthExceeded> {
        let first_only = Self::new(self.config.with_max_errors(1));
        Ok(first_only.validate(schema, instance)?.is_empty())
    }
}

/// Validate `instance` against `schema` with the given limits.
///
/// Shorthand for `Validator::new(config).validate(schema, instance)`.
pub fn validate(
    schema: &VerifiedSchema,
    instance: &Value,
    config: ValidatorConfig,
) -> Result<Vec<ValidationError>, MaxDepthExceeded> {
    Validator::new(config).validate(schema, instance)
}

/// Why a run stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    MaxErrors,
    MaxDepth,
}

type Step = Result<(), Halt>;

/// State of one validation run.
struct Vm<'a> {
    root: &'a Schema,
    config: ValidatorConfig,
    instance_tokens: Vec<String>,
    schema_tokens: Vec<Vec<String>>,
    errors: Vec<ValidationError>,
}

impl<'a> Vm<'a> {
    fn new(root: &'a Schema, config: ValidatorConfig) -> Self {
        Self {
            root,
            config,
            instance_tokens: Vec::new(),
            schema_tokens: vec![Vec::new()],
            errors: Vec::new(),
        }
    }

    /// Evaluate `schema` against `instance`. `parent_tag` is the tag of the
    /// discriminator that selected `schema`, exempt from the
    /// additional-property check one level down.
    fn eval(&mut self, schema: &'a Schema, instance: &Value, parent_tag: Option<&str>) -> Step {
        match &schema.form {
            Form::Empty => Ok(()),

            Form::Ref(name) => {
                if self.schema_tokens.len() >= self.config.max_depth {
                    return Err(Halt::MaxDepth);
                }
                // Presence is guaranteed by verification.
                let Some(target) = self.root.definition(name) else {
                    return Ok(());
                };
                self.schema_tokens
                    .push(vec!["definitions".to_string(), name.clone()]);
                self.eval(target, instance, None)?;
                self.schema_tokens.pop();
                Ok(())
            }

            Form::Type(primitive) => {
                if primitive.accepts(instance) {
                    Ok(())
                } else {
                    self.error_at("type")
                }
            }

            Form::Enum(values) => match instance.as_str() {
                Some(s) if values.iter().any(|v| v == s) => Ok(()),
                _ => self.error_at("enum"),
            },

            Form::Elements(inner) => {
                let Some(items) = instance.as_array() else {
                    return self.error_at("elements");
                };
                self.push_schema_token("elements");
                for (index, item) in items.iter().enumerate() {
                    self.instance_tokens.push(index.to_string());
                    self.eval(inner, item, None)?;
                    self.instance_tokens.pop();
                }
                self.pop_schema_token();
                Ok(())
            }

            Form::Properties(props) => {
                let Some(object) = instance.as_object() else {
                    return self.error_at(if props.required.is_some() {
                        "properties"
                    } else {
                        "optionalProperties"
                    });
                };

                if let Some(required) = &props.required {
                    self.push_schema_token("properties");
                    for (name, member) in required.iter() {
                        self.push_schema_token(name);
                        match object.get(name) {
                            Some(value) => {
                                self.instance_tokens.push(name.clone());
                                self.eval(member, value, None)?;
                                self.instance_tokens.pop();
                            }
                            None => self.push_error()?,
                        }
                        self.pop_schema_token();
                    }
                    self.pop_schema_token();
                }

                if let Some(optional) = &props.optional {
                    self.push_schema_token("optionalProperties");
                    for (name, member) in optional.iter() {
                        if let Some(value) = object.get(name) {
                            self.push_schema_token(name);
                            self.instance_tokens.push(name.clone());
                            self.eval(member, value, None)?;
                            self.instance_tokens.pop();
                            self.pop_schema_token();
                        }
                    }
                    self.pop_schema_token();
                }

                if !props.additional {
                    for name in object.keys() {
                        if props.declares(name) || parent_tag == Some(name.as_str()) {
                            continue;
                        }
                        self.instance_tokens.push(name.clone());
                        self.push_error()?;
                        self.instance_tokens.pop();
                    }
                }
                Ok(())
            }

            Form::Values(inner) => {
                let Some(object) = instance.as_object() else {
                    return self.error_at("values");
                };
                self.push_schema_token("values");
                for (name, value) in object {
                    self.instance_tokens.push(name.clone());
                    self.eval(inner, value, None)?;
                    self.instance_tokens.pop();
                }
                self.pop_schema_token();
                Ok(())
            }

            Form::Discriminator(discriminator) => {
                let Some(object) = instance.as_object() else {
                    return self.error_at("discriminator");
                };
                let tag = discriminator.tag.as_str();

                self.push_schema_token("discriminator");
                match object.get(tag) {
                    None => self.error_at("tag")?,
                    Some(Value::String(tag_value)) => match discriminator.mapping.get(tag_value) {
                        None => {
                            self.instance_tokens.push(tag.to_string());
                            self.error_at("mapping")?;
                            self.instance_tokens.pop();
                        }
                        Some(variant) => {
                            self.push_schema_token("mapping");
                            self.push_schema_token(tag_value);
                            self.eval(variant, instance, Some(tag))?;
                            self.pop_schema_token();
                            self.pop_schema_token();
                        }
                    },
                    Some(_) => {
                        self.instance_tokens.push(tag.to_string());
                        self.error_at("tag")?;
                        self.instance_tokens.pop();
                    }
                }
                self.pop_schema_token();
                Ok(())
            }
        }
    }

    fn push_schema_token(&mut self, token: &str) {
        if let Some(frame) = self.schema_tokens.last_mut() {
            frame.push(token.to_string());
        }
    }

    fn pop_schema_token(&mut self) {
        if let Some(frame) = self.schema_tokens.last_mut() {
            frame.pop();
        }
    }

    /// Record an error at the current paths.
    fn push_error(&mut self) -> Step {
        self.errors.push(ValidationError {
            instance_path: self.instance_tokens.clone(),
            schema_path: self.schema_tokens.last().cloned().unwrap_or_default(),
        });
        if self.config.max_errors != 0 && self.errors.len() >= self.config.max_errors {
            return Err(Halt::MaxErrors);
        }
        Ok(())
    }

    /// Record an error one schema token below the current schema path.
    fn error_at(&mut self, token: &str) -> Step {
        self.push_schema_token(token);
        let step = self.push_error();
        self.pop_schema_token();
        step
    }
}
