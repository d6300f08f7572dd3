//! # Verify Subcommand
//!
//! Checks that a schema document is well-formed JDDF without validating
//! any instance against it.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use jddf_schema::{verify, Schema, SchemaMap};

use crate::document::load_document;

/// Arguments for the `jddf verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Schema document (JSON, or YAML by extension).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Execute the verify subcommand.
///
/// Returns exit code: 0 if the schema is valid, 1 if it is malformed or
/// invalid. Unreadable files are operational errors.
pub fn run_verify(args: &VerifyArgs, out: &mut dyn Write) -> Result<u8> {
    let value = load_document(&args.schema)?;

    let outcome = Schema::from_json(&value)
        .map_err(|e| e.to_string())
        .and_then(|schema| verify(schema).map_err(|e| e.to_string()));

    match outcome {
        Ok(schema) => {
            writeln!(
                out,
                "OK: {} (form: {}, definitions: {})",
                args.schema.display(),
                schema.form_kind(),
                schema.definitions.as_ref().map_or(0, SchemaMap::len)
            )?;
            Ok(0)
        }
        Err(reason) => {
            writeln!(out, "FAIL: {}: {reason}", args.schema.display())?;
            Ok(1)
        }
    }
}
