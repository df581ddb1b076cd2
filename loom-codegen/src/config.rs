//! Render configuration.
//!
//! ```toml
//! indent = 2
//! header = "Code generated by loom. DO NOT EDIT."
//!
//! [target]
//! lang = "java"
//! framework = "spring"
//! ```

use std::path::Path;
use std::str::FromStr;

use eyre::{Result, WrapErr};
use loom_ir::Target;
use serde::{Deserialize, Serialize};

use crate::builder::Indent;

/// Options that tune a render pass without changing the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Indentation; each backend falls back to its own default.
    pub indent: Option<Indent>,
    /// Generator banner for packages without a preamble.
    pub header: Option<String>,
    /// Overrides the module's target. Only the language selects the
    /// backend; the remaining fields steer macro dispatch.
    pub target: Option<Target>,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("invalid render configuration")
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("unable to read {}", path.display()))?;
        Self::from_toml_str(&content).wrap_err_with(|| format!("in {}", path.display()))
    }
}

impl FromStr for RenderConfig {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s)
    }
}
