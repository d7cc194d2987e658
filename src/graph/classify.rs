//! Node classification by connectivity role.

use crate::relation::RelationSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Connectivity role of a table, used only for render styling
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// References others, referenced by none
    Source,
    /// Referenced by others, references none
    Sink,
    /// Both references and is referenced
    Hub,
    /// Touched by no edge
    Isolated,
    /// No classification available for the node
    Default,
}

impl NodeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeRole::Source => "source",
            NodeRole::Sink => "sink",
            NodeRole::Hub => "hub",
            NodeRole::Isolated => "isolated",
            NodeRole::Default => "default",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In/out degree of one node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degree {
    pub in_degree: usize,
    pub out_degree: usize,
}

impl Degree {
    /// Role by precedence: source, hub, sink, then isolated
    pub fn role(self) -> NodeRole {
        match (self.out_degree > 0, self.in_degree > 0) {
            (true, false) => NodeRole::Source,
            (true, true) => NodeRole::Hub,
            (false, true) => NodeRole::Sink,
            (false, false) => NodeRole::Isolated,
        }
    }
}

/// Computes degrees and roles over a relation set
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphClassifier;

impl GraphClassifier {
    /// Degree of every listed node plus every edge endpoint
    pub fn degrees<I, S>(nodes: I, edges: &RelationSet) -> BTreeMap<String, Degree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut degrees: BTreeMap<String, Degree> = nodes
            .into_iter()
            .map(|n| (n.as_ref().to_string(), Degree::default()))
            .collect();

        for edge in edges {
            degrees
                .entry(edge.source_table.clone())
                .or_default()
                .out_degree += 1;
            degrees
                .entry(edge.target_table.clone())
                .or_default()
                .in_degree += 1;
        }

        degrees
    }

    /// Role of every listed node plus every edge endpoint
    pub fn classify<I, S>(nodes: I, edges: &RelationSet) -> BTreeMap<String, NodeRole>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::degrees(nodes, edges)
            .into_iter()
            .map(|(name, degree)| (name, degree.role()))
            .collect()
    }
}
