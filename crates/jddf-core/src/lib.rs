//! # jddf-core — Foundational Types for JDDF
//!
//! This crate is the leaf of the JDDF workspace. It defines the types every
//! other crate agrees on: the error hierarchy, the schema form names, the
//! primitive type names, and the path and timestamp helpers used by the
//! validator.
//!
//! ## Key Design Principles
//!
//! 1. **Distinct error kinds.** Construction, verification, and the fatal
//!    depth bound each have their own error type. Callers can never mistake
//!    "the schema is broken" for "the instance is invalid".
//!
//! 2. **Closed enumerations.** `FormKind` and `PrimitiveType` are exhaustive
//!    enums. Adding a form or a type forces every `match` to handle it.
//!
//! 3. **Cross-implementation determinism.** Path rendering follows RFC 6901
//!    exactly so that error locations compare byte-for-byte with other
//!    JDDF implementations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jddf-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod form;
pub mod pointer;
pub mod primitive;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{MalformedSchema, MaxDepthExceeded, SchemaError, SchemaInvalid};
pub use form::{FormKind, FORM_COUNT};
pub use pointer::{from_pointer, to_pointer};
pub use primitive::{PrimitiveType, PRIMITIVE_TYPE_COUNT};
pub use temporal::{is_rfc3339, parse_rfc3339, TimestampError};
