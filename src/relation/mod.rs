//! Relation derivation.
//!
//! Two independent ways to turn a [`SchemaSnapshot`](crate::schema::SchemaSnapshot)
//! into a set of directed table relations:
//! - `foreign_key`: exact edges from declared foreign keys
//! - `inference`: edges guessed from `<prefix>_id` column naming conventions

mod foreign_key;
mod inference;
mod naming;

pub use foreign_key::ForeignKeyRelationExtractor;
pub use inference::{ConventionRelationInferrer, Inference};
pub use naming::{CandidateStrategy, NamingConvention, PREFIX_PLACEHOLDER};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A directed relation from a referencing table to a referenced table.
///
/// Column fields are informational; table-pair identity is derived on demand
/// via [`RelationEdge::table_pair`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
pub struct RelationEdge {
    pub source_table: String,
    pub source_column: Option<String>,
    pub target_table: String,
    pub target_column: Option<String>,
}

impl RelationEdge {
    /// Edge with known column pair
    pub fn with_columns(
        source_table: &str,
        source_column: &str,
        target_table: &str,
        target_column: &str,
    ) -> Self {
        Self {
            source_table: source_table.to_string(),
            source_column: Some(source_column.to_string()),
            target_table: target_table.to_string(),
            target_column: Some(target_column.to_string()),
        }
    }

    /// Table-level edge without column information
    pub fn between(source_table: &str, target_table: &str) -> Self {
        Self {
            source_table: source_table.to_string(),
            source_column: None,
            target_table: target_table.to_string(),
            target_column: None,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_table == self.target_table
    }

    /// Ordered (source, target) table pair
    pub fn table_pair(&self) -> (&str, &str) {
        (self.source_table.as_str(), self.target_table.as_str())
    }

    /// `"<src>.<col> = <dst>.<col>"` when both columns are known
    pub fn column_label(&self) -> Option<String> {
        match (&self.source_column, &self.target_column) {
            (Some(sc), Some(tc)) => Some(format!(
                "{}.{} = {}.{}",
                self.source_table, sc, self.target_table, tc
            )),
            _ => None,
        }
    }
}

impl fmt::Display for RelationEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column_label() {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "{} -> {}", self.source_table, self.target_table),
        }
    }
}

/// Ordered, duplicate-free set of relation edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    edges: BTreeSet<RelationEdge>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, returning false if it was already present
    pub fn insert(&mut self, edge: RelationEdge) -> bool {
        self.edges.insert(edge)
    }

    pub fn contains(&self, edge: &RelationEdge) -> bool {
        self.edges.contains(edge)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate edges in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &RelationEdge> {
        self.edges.iter()
    }

    /// Distinct ordered table pairs, collapsing multiple column pairs
    pub fn table_pairs(&self) -> BTreeSet<(&str, &str)> {
        self.edges.iter().map(RelationEdge::table_pair).collect()
    }

    /// Every table touched by at least one edge endpoint
    pub fn tables(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flat_map(|e| [e.source_table.as_str(), e.target_table.as_str()])
            .collect()
    }

    /// Keep only edges whose both endpoints satisfy `keep`
    pub fn retain_tables<F>(&mut self, keep: F)
    where
        F: Fn(&str) -> bool,
    {
        self.edges
            .retain(|e| keep(&e.source_table) && keep(&e.target_table));
    }

    /// Merge another set into this one
    pub fn extend(&mut self, other: RelationSet) {
        self.edges.extend(other.edges);
    }
}

impl FromIterator<RelationEdge> for RelationSet {
    fn from_iter<I: IntoIterator<Item = RelationEdge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'a RelationEdge;
    type IntoIter = std::collections::btree_set::Iter<'a, RelationEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl IntoIterator for RelationSet {
    type Item = RelationEdge;
    type IntoIter = std::collections::btree_set::IntoIter<RelationEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

/// Which derivation path produces the relation set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationStrategy {
    /// Declared foreign keys only
    ForeignKeys,
    /// Column naming conventions only
    Convention,
    /// Foreign keys when the schema declares any, otherwise conventions
    #[default]
    Auto,
}

impl RelationStrategy {
    /// Resolve `Auto` against a snapshot's declared foreign keys
    pub fn resolve(self, has_foreign_keys: bool) -> Self {
        match self {
            RelationStrategy::Auto if has_foreign_keys => RelationStrategy::ForeignKeys,
            RelationStrategy::Auto => RelationStrategy::Convention,
            other => other,
        }
    }
}

impl FromStr for RelationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fk" | "foreign-keys" | "foreign_keys" => Ok(RelationStrategy::ForeignKeys),
            "infer" | "inference" | "convention" => Ok(RelationStrategy::Convention),
            "auto" => Ok(RelationStrategy::Auto),
            _ => Err(format!(
                "Unknown strategy: {}. Valid options: fk, infer, auto",
                s
            )),
        }
    }
}

impl fmt::Display for RelationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationStrategy::ForeignKeys => write!(f, "fk"),
            RelationStrategy::Convention => write!(f, "infer"),
            RelationStrategy::Auto => write!(f, "auto"),
        }
    }
}
