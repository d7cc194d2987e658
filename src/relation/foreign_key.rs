//! Exact relations from declared foreign keys.

use super::{RelationEdge, RelationSet};
use crate::schema::SchemaSnapshot;

/// Emits one edge per constrained/referenced column pair of every declared foreign key.
///
/// Self-referencing keys produce self-loops and are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignKeyRelationExtractor;

impl ForeignKeyRelationExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, snapshot: &SchemaSnapshot) -> RelationSet {
        let mut relations = RelationSet::new();

        for table in snapshot.tables() {
            for fk in &table.foreign_keys {
                for (local, referred) in fk.column_pairs() {
                    let edge =
                        RelationEdge::with_columns(&table.name, local, &fk.referred_table, referred);
                    tracing::debug!(edge = %edge, "foreign key relation");
                    relations.insert(edge);
                }
            }
        }

        relations
    }
}
