//! Candidate target-table naming strategies for convention-based inference.
//!
//! Naming conventions are project-specific, so the list of table names tried
//! for a `<prefix>_id` column is configurable:
//! ```yaml
//! naming:
//!   candidates: ["{prefix}", "{prefix}s", "{prefix}_info", "tbl_{prefix}"]
//!   suffix: "_id"
//!   target_column: "id"
//!   aliases:
//!     manager: employee
//! ```
//!
//! Aliases map a prefix straight to a table name and are tried before the
//! patterns.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder replaced by the column prefix in candidate patterns
pub const PREFIX_PLACEHOLDER: &str = "{prefix}";

/// Decides which columns look like references and which tables they may point at
pub trait CandidateStrategy: fmt::Debug + Send + Sync {
    /// Strip the reference suffix, or `None` if the column is not a reference
    fn prefix_of<'a>(&self, column: &'a str) -> Option<&'a str>;

    /// Candidate target table names, most preferred first
    fn candidates(&self, prefix: &str) -> Vec<String>;

    /// Single-column primary key name a target table must have
    fn target_column(&self) -> &str;
}

/// Pattern-list naming convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    /// Candidate patterns; `{prefix}` is substituted
    pub candidates: Vec<String>,
    /// Case-sensitive column suffix that triggers inference
    pub suffix: String,
    /// Required single-column primary key of targets
    pub target_column: String,
    /// Prefix to table name, tried first (`manager` -> `employee`)
    pub aliases: BTreeMap<String, String>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            candidates: vec!["{prefix}".to_string(), "{prefix}s".to_string()],
            suffix: "_id".to_string(),
            target_column: "id".to_string(),
            aliases: BTreeMap::new(),
        }
    }
}

impl NamingConvention {
    /// Default list plus `{prefix}_info` and `tbl_{prefix}`
    pub fn extended() -> Self {
        let mut convention = Self::default();
        convention.candidates.push("{prefix}_info".to_string());
        convention.candidates.push("tbl_{prefix}".to_string());
        convention
    }

    /// Replace candidates from a comma-separated pattern list
    pub fn with_candidate_list(mut self, list: &str) -> anyhow::Result<Self> {
        self.candidates = list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        self.validate()?;
        Ok(self)
    }

    /// Add a prefix alias
    pub fn with_alias(mut self, prefix: impl Into<String>, table: impl Into<String>) -> Self {
        self.aliases.insert(prefix.into(), table.into());
        self
    }

    /// Validate the convention
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.candidates.is_empty() {
            bail!("naming convention requires at least one candidate pattern");
        }
        if let Some(bad) = self
            .candidates
            .iter()
            .find(|p| !p.contains(PREFIX_PLACEHOLDER))
        {
            bail!(
                "candidate pattern '{}' does not contain {}",
                bad,
                PREFIX_PLACEHOLDER
            );
        }
        if self.suffix.is_empty() {
            bail!("naming convention suffix must not be empty");
        }
        if self.target_column.is_empty() {
            bail!("naming convention target column must not be empty");
        }
        if let Some((prefix, _)) = self
            .aliases
            .iter()
            .find(|(prefix, table)| prefix.is_empty() || table.is_empty())
        {
            bail!("invalid naming alias for prefix '{}'", prefix);
        }
        Ok(())
    }
}

impl CandidateStrategy for NamingConvention {
    fn prefix_of<'a>(&self, column: &'a str) -> Option<&'a str> {
        column
            .strip_suffix(self.suffix.as_str())
            .filter(|prefix| !prefix.is_empty())
    }

    fn candidates(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.candidates.len() + 1);
        if let Some(table) = self.aliases.get(prefix) {
            names.push(table.clone());
        }
        for pattern in &self.candidates {
            let name = pattern.replace(PREFIX_PLACEHOLDER, prefix);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn target_column(&self) -> &str {
        &self.target_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates() {
        let c = NamingConvention::default();
        assert_eq!(c.candidates("user"), vec!["user", "users"]);
        assert_eq!(c.target_column(), "id");
    }

    #[test]
    fn test_extended_candidates() {
        let c = NamingConvention::extended();
        assert_eq!(
            c.candidates("dept"),
            vec!["dept", "depts", "dept_info", "tbl_dept"]
        );
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let c = NamingConvention::default();
        assert_eq!(c.prefix_of("user_id"), Some("user"));
        assert_eq!(c.prefix_of("created_by_id"), Some("created_by"));
        assert_eq!(c.prefix_of("user_ID"), None);
        assert_eq!(c.prefix_of("userid"), None);
        assert_eq!(c.prefix_of("_id"), None);
        assert_eq!(c.prefix_of("id"), None);
    }

    #[test]
    fn test_duplicate_patterns_collapse() {
        let c = NamingConvention::default()
            .with_candidate_list("{prefix}, {prefix}")
            .unwrap();
        assert_eq!(c.candidates("user"), vec!["user"]);
    }

    #[test]
    fn test_validate_rejects_pattern_without_placeholder() {
        assert!(NamingConvention::default()
            .with_candidate_list("{prefix},users")
            .is_err());
        assert!(NamingConvention::default().with_candidate_list("").is_err());
    }

    #[test]
    fn test_alias_tried_first() {
        let c = NamingConvention::default().with_alias("manager", "employee");
        assert_eq!(
            c.candidates("manager"),
            vec!["employee", "manager", "managers"]
        );
        assert_eq!(c.candidates("user"), vec!["user", "users"]);
        assert!(c.validate().is_ok());
        assert!(NamingConvention::default()
            .with_alias("boss", "")
            .validate()
            .is_err());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = "candidates: [\"tbl_{prefix}\"]\n";
        let c: NamingConvention = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(c.candidates, vec!["tbl_{prefix}"]);
        assert_eq!(c.suffix, "_id");
        assert_eq!(c.target_column, "id");
        assert!(c.aliases.is_empty());

        let yaml = "aliases:\n  manager: employee\n";
        let c: NamingConvention = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(c.aliases.get("manager").map(String::as_str), Some("employee"));
    }
}
