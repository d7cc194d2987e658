//! Relations inferred from column naming conventions.
//!
//! For each non-primary-key column ending in the configured suffix, candidate
//! target tables are tried in preference order. The first candidate that is a
//! selected table with a single-column primary key named like the target
//! column wins; later matches are only reported as ambiguity.

use super::naming::{CandidateStrategy, NamingConvention};
use super::{RelationEdge, RelationSet};
use crate::diagnostics::Diagnostic;
use crate::schema::{SchemaSnapshot, Table};
use std::collections::BTreeSet;

/// Inferred relations with the diagnostics raised along the way
#[derive(Debug, Clone, Default)]
pub struct Inference {
    pub relations: RelationSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Infers relations from `<prefix>_id` style columns
#[derive(Debug, Clone)]
pub struct ConventionRelationInferrer<S = NamingConvention> {
    strategy: S,
}

impl Default for ConventionRelationInferrer<NamingConvention> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConventionRelationInferrer<NamingConvention> {
    /// Inferrer using the default `[prefix, prefix + "s"]` convention
    pub fn new() -> Self {
        Self {
            strategy: NamingConvention::default(),
        }
    }
}

impl<S: CandidateStrategy> ConventionRelationInferrer<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Infer over every table in the snapshot
    pub fn infer_all(&self, snapshot: &SchemaSnapshot) -> Inference {
        let all: BTreeSet<String> = snapshot.table_names().map(str::to_string).collect();
        self.infer(snapshot, &all)
    }

    /// Infer relations, scanning and targeting only `candidate_tables`
    pub fn infer(&self, snapshot: &SchemaSnapshot, candidate_tables: &BTreeSet<String>) -> Inference {
        let mut result = Inference::default();

        for table in snapshot
            .tables()
            .filter(|t| candidate_tables.contains(&t.name))
        {
            for column in &table.columns {
                if table.is_pk_column(&column.name) {
                    continue;
                }
                let Some(prefix) = self.strategy.prefix_of(&column.name) else {
                    continue;
                };

                let matches: Vec<String> = self
                    .strategy
                    .candidates(prefix)
                    .into_iter()
                    .filter(|name| {
                        candidate_tables.contains(name)
                            && snapshot
                                .get_table(name)
                                .is_some_and(|t| self.is_valid_target(t))
                    })
                    .collect();

                let Some((chosen, alternatives)) = matches.split_first() else {
                    tracing::debug!(
                        table = %table.name,
                        column = %column.name,
                        "no candidate table matched"
                    );
                    continue;
                };

                let edge = RelationEdge::with_columns(
                    &table.name,
                    &column.name,
                    chosen,
                    self.strategy.target_column(),
                );
                tracing::debug!(edge = %edge, "inferred relation");
                result.relations.insert(edge);

                if !alternatives.is_empty() {
                    result.diagnostics.push(Diagnostic::AmbiguousInference {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        chosen: chosen.clone(),
                        alternatives: alternatives.to_vec(),
                    });
                }
            }
        }

        result
    }

    fn is_valid_target(&self, table: &Table) -> bool {
        table.single_primary_key() == Some(self.strategy.target_column())
    }
}
