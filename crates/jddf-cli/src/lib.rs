//! # jddf-cli — Command-Line Interface for JDDF
//!
//! Provides the `jddf` binary.
//!
//! ## Subcommands
//!
//! - `jddf verify` — Check that a schema document is valid JDDF.
//! - `jddf validate` — Validate instance documents against a schema.
//!
//! ```bash
//! jddf verify user.schema.json
//! jddf validate --schema user.schema.json alice.json bob.yaml --max-errors 10
//! jddf --config jddf.yaml validate -s user.schema.yaml data/*.json --format json
//! ```
//!
//! Exit codes: 0 when everything checked is valid, 1 when a schema or
//! instance is invalid, 2 on operational failure (unreadable files,
//! max depth exceeded).

pub mod config;
pub mod document;
pub mod validate;
pub mod verify;
