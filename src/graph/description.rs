//! Renderer-agnostic graph description.
//!
//! Nodes and edges come out sorted so that unchanged input always yields an
//! identical description.

use crate::error::GraphError;
use crate::graph::classify::NodeRole;
use crate::graph::style::StyleConfig;
use crate::relation::RelationSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Edge identity used when rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One unlabeled edge per ordered (source, target) table pair
    TablePairs,
    /// One edge per column pair, labeled `src.col = dst.col`
    #[default]
    ColumnPairs,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tables" | "table" | "table-pairs" | "table_pairs" => Ok(RenderMode::TablePairs),
            "columns" | "column" | "column-pairs" | "column_pairs" => Ok(RenderMode::ColumnPairs),
            _ => Err(format!(
                "Unknown render mode: {}. Valid options: tables, columns",
                s
            )),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::TablePairs => write!(f, "tables"),
            RenderMode::ColumnPairs => write!(f, "columns"),
        }
    }
}

/// A table node with its role and fill color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NodeEntry {
    pub name: String,
    pub role: NodeRole,
    pub fill_color: String,
}

/// A directed edge, optionally labeled with its column pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct EdgeEntry {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The node/edge payload handed to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GraphDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub mode: RenderMode,
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

impl GraphDescription {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn get_node(&self, name: &str) -> Option<&NodeEntry> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Number of nodes with the given role
    pub fn role_count(&self, role: NodeRole) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }
}

/// Assembles a [`GraphDescription`] from relations and roles
#[derive(Debug, Clone)]
pub struct GraphDescriptionBuilder<'a> {
    style: &'a StyleConfig,
    mode: RenderMode,
    title: Option<String>,
}

impl<'a> GraphDescriptionBuilder<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self {
            style,
            mode: RenderMode::default(),
            title: None,
        }
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the description.
    ///
    /// Nodes are exactly the tables touched by `edges`. A node missing from
    /// `roles` is styled as [`NodeRole::Default`].
    pub fn build(
        &self,
        edges: &RelationSet,
        roles: &BTreeMap<String, NodeRole>,
    ) -> Result<GraphDescription, GraphError> {
        if edges.is_empty() {
            return Err(GraphError::EmptyRelationSet {
                scope: "graph description".to_string(),
            });
        }

        let nodes = edges
            .tables()
            .into_iter()
            .map(|name| {
                let role = roles.get(name).copied().unwrap_or(NodeRole::Default);
                NodeEntry {
                    name: name.to_string(),
                    role,
                    fill_color: self.style.fill_color(role).to_string(),
                }
            })
            .collect();

        let edges = match self.mode {
            RenderMode::TablePairs => edges
                .table_pairs()
                .into_iter()
                .map(|(source, target)| EdgeEntry {
                    source: source.to_string(),
                    target: target.to_string(),
                    label: None,
                })
                .collect(),
            RenderMode::ColumnPairs => edges
                .iter()
                .map(|e| EdgeEntry {
                    source: e.source_table.clone(),
                    target: e.target_table.clone(),
                    label: e.column_label(),
                })
                .collect(),
        };

        Ok(GraphDescription {
            title: self.title.clone(),
            mode: self.mode,
            nodes,
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::classify::GraphClassifier;
    use crate::relation::RelationEdge;

    fn relations() -> RelationSet {
        [
            RelationEdge::with_columns("post", "created_by_id", "user", "id"),
            RelationEdge::with_columns("post", "updated_by_id", "user", "id"),
            RelationEdge::with_columns("comment", "post_id", "post", "id"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_edges_fail() {
        let style = StyleConfig::default();
        let err = GraphDescriptionBuilder::new(&style)
            .build(&RelationSet::new(), &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, GraphError::EmptyRelationSet { .. }));
    }

    #[test]
    fn test_column_mode_labels() {
        let style = StyleConfig::default();
        let rels = relations();
        let roles = GraphClassifier::classify(Vec::<&str>::new(), &rels);
        let desc = GraphDescriptionBuilder::new(&style).build(&rels, &roles).unwrap();

        assert_eq!(desc.edge_count(), 3);
        assert_eq!(
            desc.edges[0].label.as_deref(),
            Some("comment.post_id = post.id")
        );
        let names: Vec<_> = desc.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["comment", "post", "user"]);
        assert_eq!(desc.get_node("post").unwrap().role, NodeRole::Hub);
        assert_eq!(desc.get_node("post").unwrap().fill_color, "#D1FFBD");
    }

    #[test]
    fn test_table_mode_collapses_pairs() {
        let style = StyleConfig::default();
        let rels = relations();
        let roles = GraphClassifier::classify(Vec::<&str>::new(), &rels);
        let desc = GraphDescriptionBuilder::new(&style)
            .mode(RenderMode::TablePairs)
            .build(&rels, &roles)
            .unwrap();

        assert_eq!(desc.edge_count(), 2);
        assert!(desc.edges.iter().all(|e| e.label.is_none()));
    }

    #[test]
    fn test_missing_role_uses_default_color() {
        let style = StyleConfig::default();
        let desc = GraphDescriptionBuilder::new(&style)
            .build(&relations(), &BTreeMap::new())
            .unwrap();
        assert!(desc.nodes.iter().all(|n| n.role == NodeRole::Default));
        assert!(desc.nodes.iter().all(|n| n.fill_color == "#87CEEB"));
    }
}
