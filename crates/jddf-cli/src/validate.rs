//! # Validate Subcommand
//!
//! Validates one or more instance documents against a schema and prints
//! every error as a pair of JSON Pointers (instance path, schema path).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;

use jddf_schema::Validator;

use crate::config::CliConfig;
use crate::document::{load_document, load_schema};

/// Output format for validation errors.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable summary per instance.
    #[default]
    Text,
    /// One JSON object per error, one per line.
    Json,
}

/// Arguments for the `jddf validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema document (JSON, or YAML by extension).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Instance documents to validate.
    #[arg(value_name = "INSTANCE", required = true)]
    pub instances: Vec<PathBuf>,

    /// Maximum `ref` nesting depth.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop each instance after this many errors; 0 disables the limit.
    #[arg(long)]
    pub max_errors: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every instance is valid, 1 if any is invalid.
/// Load failures, schema defects and max-depth aborts are returned as
/// errors (exit code 2 in the binary).
pub fn run_validate(args: &ValidateArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let schema = load_schema(&args.schema)?;
    let validator = Validator::new(config.validator_config(args.max_depth, args.max_errors));

    tracing::debug!(config = ?validator.config(), instances = args.instances.len(), "validating");

    let mut had_failures = false;
    for path in &args.instances {
        let instance = load_document(path)?;
        let errors = validator
            .validate(&schema, &instance)
            .with_context(|| format!("cannot validate {}", path.display()))?;

        match args.format {
            OutputFormat::Text => {
                if errors.is_empty() {
                    writeln!(out, "OK: {}", path.display())?;
                } else {
                    writeln!(out, "FAIL: {} ({} error(s))", path.display(), errors.len())?;
                    for error in &errors {
                        writeln!(out, "  {error}")?;
                    }
                }
            }
            OutputFormat::Json => {
                for error in &errors {
                    let line = json!({
                        "instance": path.display().to_string(),
                        "instancePath": error.instance_pointer(),
                        "schemaPath": error.schema_pointer(),
                    });
                    writeln!(out, "{line}")?;
                }
            }
        }

        had_failures |= !errors.is_empty();
    }

    Ok(u8::from(had_failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jddf_schema::ValidatorConfig;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn args(schema: PathBuf, instances: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            schema,
            instances,
            max_depth: None,
            max_errors: None,
            format: OutputFormat::Text,
        }
    }

    fn run(args: &ValidateArgs, config: &CliConfig) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_validate(args, config, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_valid_and_invalid_instances() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "schema.json", r#"{"properties": {"name": {"type": "string"}}}"#);
        let good = write(&dir, "good.json", r#"{"name": "a"}"#);
        let bad = write(&dir, "bad.yaml", "name: 1\nextra: true\n");

        let (code, out) = run(&args(schema.clone(), vec![good.clone()]), &CliConfig::default());
        assert_eq!(code, 0);
        assert!(out.starts_with("OK: "));

        let (code, out) = run(&args(schema, vec![good, bad]), &CliConfig::default());
        assert_eq!(code, 1);
        assert!(out.contains("FAIL: "));
        assert!(out.contains("(2 error(s))"));
        assert!(out.contains("/name: schema /properties/name/type"));
        assert!(out.contains("/extra: schema "));
    }

    #[test]
    fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "schema.json", r#"{"elements": {"type": "string"}}"#);
        let instance = write(&dir, "instance.json", r#"["a", 1]"#);
        let mut a = args(schema, vec![instance]);
        a.format = OutputFormat::Json;

        let (code, out) = run(&a, &CliConfig::default());
        assert_eq!(code, 1);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["instancePath"], "/1");
        assert_eq!(lines[0]["schemaPath"], "/elements/type");
    }

    #[test]
    fn test_max_errors_from_config_and_flag() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "schema.json", r#"{"elements": {"type": "string"}}"#);
        let instance = write(&dir, "instance.json", "[1, 2, 3, 4, 5]");
        let config = CliConfig {
            validator: ValidatorConfig::default().with_max_errors(2),
        };

        let (_, out) = run(&args(schema.clone(), vec![instance.clone()]), &config);
        assert!(out.contains("(2 error(s))"));

        let mut a = args(schema, vec![instance]);
        a.max_errors = Some(4);
        let (_, out) = run(&a, &config);
        assert!(out.contains("(4 error(s))"));
    }

    #[test]
    fn test_max_depth_is_operational_error() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "schema.json", r#"{"definitions": {"": {"ref": ""}}, "ref": ""}"#);
        let instance = write(&dir, "instance.json", "null");
        let mut a = args(schema, vec![instance]);
        a.max_depth = Some(3);

        let err = run_validate(&a, &CliConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("max depth of 3 exceeded"));
    }

    #[test]
    fn test_recursive_schema_bounded_without_flags() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "schema.json", r#"{"definitions": {"": {"ref": ""}}, "ref": ""}"#);
        let instance = write(&dir, "instance.json", "null");

        let err = run_validate(&args(schema, vec![instance]), &CliConfig::default(), &mut Vec::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("max depth of 32 exceeded"));
    }

    #[test]
    fn test_invalid_schema_is_operational_error() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "schema.json", r#"{"type": "string", "enum": ["a"]}"#);
        let instance = write(&dir, "instance.json", r#""a""#);
        let err = run_validate(&args(schema, vec![instance]), &CliConfig::default(), &mut Vec::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("mixes type and enum forms"));
    }
}
