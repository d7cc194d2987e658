//! JSON format output for graph descriptions.

use crate::diagnostics::{Diagnostic, DiagnosticJson};
use crate::graph::analysis::Cycle;
use crate::graph::classify::NodeRole;
use crate::graph::description::{EdgeEntry, GraphDescription, NodeEntry, RenderMode};
use schemars::JsonSchema;
use serde::Serialize;

/// JSON representation of a generated graph
#[derive(Debug, Serialize, JsonSchema)]
pub struct GraphJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Relation strategy actually used (`fk` or `infer`)
    pub strategy: String,
    pub mode: RenderMode,
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
    pub cycles: Vec<Vec<String>>,
    pub diagnostics: Vec<DiagnosticJson>,
    pub stats: GraphStats,
}

/// Graph statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct GraphStats {
    pub table_count: usize,
    pub relationship_count: usize,
    pub source_count: usize,
    pub hub_count: usize,
    pub sink_count: usize,
    pub cycle_count: usize,
    pub diagnostic_count: usize,
}

/// Generate pretty-printed JSON
pub fn to_json(graph: &GraphJson) -> String {
    serde_json::to_string_pretty(graph).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_graph_json(
    desc: &GraphDescription,
    strategy: &str,
    cycles: &[Cycle],
    diagnostics: &[Diagnostic],
) -> GraphJson {
    GraphJson {
        title: desc.title.clone(),
        strategy: strategy.to_string(),
        mode: desc.mode,
        nodes: desc.nodes.clone(),
        edges: desc.edges.clone(),
        cycles: cycles.iter().map(|c| c.tables.clone()).collect(),
        diagnostics: diagnostics.iter().map(DiagnosticJson::from).collect(),
        stats: GraphStats {
            table_count: desc.node_count(),
            relationship_count: desc.edge_count(),
            source_count: desc.role_count(NodeRole::Source),
            hub_count: desc.role_count(NodeRole::Hub),
            sink_count: desc.role_count(NodeRole::Sink),
            cycle_count: cycles.len(),
            diagnostic_count: diagnostics.len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_description() -> GraphDescription {
        GraphDescription {
            title: Some("Schema (Inferred)".to_string()),
            mode: RenderMode::ColumnPairs,
            nodes: vec![
                NodeEntry {
                    name: "employee".to_string(),
                    role: NodeRole::Hub,
                    fill_color: "#D1FFBD".to_string(),
                },
            ],
            edges: vec![EdgeEntry {
                source: "employee".to_string(),
                target: "employee".to_string(),
                label: Some("employee.manager_id = employee.id".to_string()),
            }],
        }
    }

    #[test]
    fn test_json_structure() {
        let desc = create_test_description();
        let cycles = vec![Cycle {
            tables: vec!["employee".to_string()],
        }];
        let graph = build_graph_json(&desc, "infer", &cycles, &[]);

        assert_eq!(graph.stats.table_count, 1);
        assert_eq!(graph.stats.relationship_count, 1);
        assert_eq!(graph.stats.hub_count, 1);
        assert_eq!(graph.stats.cycle_count, 1);
        assert_eq!(graph.cycles, vec![vec!["employee".to_string()]]);
    }

    #[test]
    fn test_json_output() {
        let desc = create_test_description();
        let output = to_json(&build_graph_json(&desc, "infer", &[], &[]));

        assert!(output.contains("\"strategy\": \"infer\""));
        assert!(output.contains("\"mode\": \"column_pairs\""));
        assert!(output.contains("\"role\": \"hub\""));
        assert!(output.contains("\"fill_color\": \"#D1FFBD\""));
        assert!(output.contains("\"label\": \"employee.manager_id = employee.id\""));
    }
}
