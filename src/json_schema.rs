//! JSON Schema generation for `--json` output.
//!
//! Exported via the `schema` subcommand so consumers can validate output.

use schemars::{schema_for, Schema};

/// Schema of the `graph --json` output
pub fn graph_schema() -> Schema {
    schema_for!(crate::graph::format::GraphJson)
}

/// Pretty-printed schema text
pub fn graph_schema_json() -> String {
    serde_json::to_string_pretty(&graph_schema()).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mentions_output_fields() {
        let text = graph_schema_json();
        assert!(text.contains("\"nodes\""));
        assert!(text.contains("\"edges\""));
        assert!(text.contains("\"diagnostics\""));
        assert!(text.contains("\"fill_color\""));
    }
}
