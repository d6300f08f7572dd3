//! # CLI Configuration
//!
//! Optional configuration file (JSON or YAML) passed with `--config`:
//!
//! ```yaml
//! validator:
//!   max_depth: 32
//!   max_errors: 100
//! ```
//!
//! Precedence: command-line flags, then the file, then built-in defaults
//! (a `ref` depth of 32, no error limit).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use jddf_schema::ValidatorConfig;

use crate::document::load_document;

/// Contents of the `--config` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Limits applied to every validation run.
    pub validator: ValidatorConfig,
}

impl CliConfig {
    /// Load the configuration file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let value = load_document(path)?;
        let config: Self = serde_json::from_value(value)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Validator limits after applying command-line overrides.
    pub fn validator_config(&self, max_depth: Option<usize>, max_errors: Option<usize>) -> ValidatorConfig {
        ValidatorConfig {
            max_depth: max_depth.unwrap_or(self.validator.max_depth),
            max_errors: max_errors.unwrap_or(self.validator.max_errors),
        }
    }
}
