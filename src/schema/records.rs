//! Raw metadata records supplied by a database-introspection collaborator.
//!
//! Example input document (JSON or YAML):
//! ```json
//! {
//!   "database": "shop",
//!   "columns": [
//!     { "table": "users", "column": "id", "type": "INT", "is_primary_key": true },
//!     { "table": "orders", "column": "user_id", "type": "INT" }
//!   ],
//!   "foreign_keys": [
//!     { "table": "orders", "constrained_columns": ["user_id"],
//!       "referred_table": "users", "referred_columns": ["id"] }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One row of column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub table: String,
    pub column: String,
    #[serde(rename = "type", default)]
    pub col_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
}

impl ColumnRecord {
    pub fn new(table: &str, column: &str, col_type: &str, is_primary_key: bool) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            col_type: col_type.to_string(),
            is_primary_key,
        }
    }
}

/// One declared foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRecord {
    pub table: String,
    pub constrained_columns: Vec<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
}

impl ForeignKeyRecord {
    pub fn new(table: &str, constrained: &[&str], referred_table: &str, referred: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            constrained_columns: constrained.iter().map(|s| s.to_string()).collect(),
            referred_table: referred_table.to_string(),
            referred_columns: referred.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A complete metadata document: column records plus foreign-key records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    /// Database name, used for the graph title
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnRecord>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyRecord>,
}

impl SchemaMetadata {
    /// Load a metadata document; `.yaml`/`.yml` files are read as YAML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read metadata file: {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "yaml" | "yml"))
            .unwrap_or(false);

        if is_yaml {
            serde_yaml_ng::from_str(&content)
                .with_context(|| format!("invalid YAML metadata: {}", path.display()))
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON metadata: {}", path.display()))
        }
    }
}
