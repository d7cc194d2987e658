//! YAML configuration for graph generation.
//!
//! ```yaml
//! naming:
//!   candidates: ["{prefix}", "{prefix}s", "{prefix}_info", "tbl_{prefix}"]
//! style:
//!   layout: lr
//!   colors:
//!     hub: "#D1FFBD"
//! ```

use crate::graph::StyleConfig;
use crate::relation::NamingConvention;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete YAML configuration, every section optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Candidate table naming for convention inference
    pub naming: NamingConvention,
    /// Render styling
    pub style: StyleConfig,
}

impl GraphConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: GraphConfig = serde_yaml_ng::from_str(content)?;
        config.naming.validate()?;
        Ok(config)
    }
}
