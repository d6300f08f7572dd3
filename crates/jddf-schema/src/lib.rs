//! # jddf-schema — Schema Model, Verification & Validation
//!
//! Implements the JSON Data Definition Format: a schema language with eight
//! mutually exclusive forms, and a validator whose error output is
//! reproducible across independent implementations.
//!
//! ## Pipeline
//!
//! ```text
//! serde_json::Value ──Schema::from_json──▶ Schema ──verify──▶ VerifiedSchema
//!                                                                 │
//!                         instance ──Validator::validate──────────┘──▶ Vec<ValidationError>
//! ```
//!
//! - [`Schema::from_json`] type-checks every recognized field and builds a
//!   tree of tagged [`Form`]s.
//! - [`verify`] checks the structural rules (references resolve, no
//!   duplicate enum values, no colliding property sets, valid
//!   discriminator variants) and wraps the schema as a [`VerifiedSchema`].
//! - [`Validator::validate`] walks the verified schema alongside an
//!   instance and returns every [`ValidationError`] in a fixed order.
//!
//! ## Crate Policy
//!
//! - Depends only on `jddf-core` internally.
//! - No I/O. Decoding JSON text and loading files belong to callers.
//! - Verification and validation are pure over their inputs; a verified
//!   schema can be shared read-only across concurrent validations.

pub mod discriminator;
pub mod schema;
pub mod validate;
pub mod verify;

pub use discriminator::Discriminator;
pub use schema::{Form, Properties, Schema, SchemaMap};
pub use validate::{validate, ValidationError, Validator, ValidatorConfig, DEFAULT_MAX_DEPTH};
pub use verify::{verify, VerifiedSchema};
