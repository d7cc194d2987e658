//! One-call graph generation.
//!
//! metadata -> snapshot -> relations -> roles -> description. Each call owns
//! its snapshot and intermediate sets; nothing is shared between calls.

use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::error::GraphError;
use crate::graph::{
    find_cycles, Cycle, GraphClassifier, GraphDescription, GraphDescriptionBuilder, NodeRole,
    RenderMode, StyleConfig,
};
use crate::relation::{
    ConventionRelationInferrer, ForeignKeyRelationExtractor, NamingConvention, RelationSet,
    RelationStrategy,
};
use crate::schema::{SchemaMetadata, SchemaSnapshot, SnapshotBuilder};
use glob::Pattern;
use std::collections::{BTreeMap, BTreeSet};

/// Options for a generation call
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub strategy: RelationStrategy,
    pub mode: RenderMode,
    pub naming: NamingConvention,
    pub style: StyleConfig,
    /// Only tables matching any of these (all tables when empty)
    pub include: Vec<Pattern>,
    /// Tables matching any of these are dropped
    pub exclude: Vec<Pattern>,
    /// Overrides the database name from the metadata document
    pub database: Option<String>,
    /// Fail when any diagnostic is raised
    pub strict: bool,
}

/// Result of a successful generation call
#[derive(Debug, Clone)]
pub struct Generation {
    pub description: GraphDescription,
    pub relations: RelationSet,
    pub roles: BTreeMap<String, NodeRole>,
    /// Strategy actually used after resolving `Auto`
    pub strategy: RelationStrategy,
    pub cycles: Vec<Cycle>,
    pub diagnostics: Vec<Diagnostic>,
    pub diagnostics_truncated: bool,
    pub table_count: usize,
    pub selected_count: usize,
}

/// Resolve the candidate table subset from include/exclude patterns
pub fn select_tables(
    snapshot: &SchemaSnapshot,
    include: &[Pattern],
    exclude: &[Pattern],
) -> BTreeSet<String> {
    snapshot
        .table_names()
        .filter(|name| include.is_empty() || include.iter().any(|p| p.matches(name)))
        .filter(|name| !exclude.iter().any(|p| p.matches(name)))
        .map(str::to_string)
        .collect()
}

/// Derive relations for the candidate tables with the resolved strategy
pub fn derive_relations(
    snapshot: &SchemaSnapshot,
    candidates: &BTreeSet<String>,
    strategy: RelationStrategy,
    naming: &NamingConvention,
) -> (RelationStrategy, RelationSet, Vec<Diagnostic>) {
    let resolved = strategy.resolve(snapshot.has_foreign_keys());

    match resolved {
        RelationStrategy::ForeignKeys | RelationStrategy::Auto => {
            let mut relations = ForeignKeyRelationExtractor::new().extract(snapshot);
            relations.retain_tables(|t| candidates.contains(t));
            (RelationStrategy::ForeignKeys, relations, Vec::new())
        }
        RelationStrategy::Convention => {
            let inference = ConventionRelationInferrer::with_strategy(naming.clone())
                .infer(snapshot, candidates);
            (
                RelationStrategy::Convention,
                inference.relations,
                inference.diagnostics,
            )
        }
    }
}

/// Graph title for the strategy used
pub fn graph_title(database: Option<&str>, strategy: RelationStrategy) -> String {
    let suffix = match strategy {
        RelationStrategy::Convention => "Inferred",
        _ => "FK Based",
    };
    match database {
        Some(db) if !db.is_empty() => format!("{} Schema ({})", db, suffix),
        _ => format!("Schema ({})", suffix),
    }
}

/// Generate a graph description from raw metadata
pub fn generate(
    metadata: &SchemaMetadata,
    options: &GenerateOptions,
) -> Result<Generation, GraphError> {
    let mut collector = DiagnosticCollector::new();

    let build = SnapshotBuilder::from_records(&metadata.columns, &metadata.foreign_keys);
    collector.extend(build.diagnostics);
    let snapshot = build.snapshot;

    let candidates = select_tables(&snapshot, &options.include, &options.exclude);
    let (strategy, relations, inference_diagnostics) =
        derive_relations(&snapshot, &candidates, options.strategy, &options.naming);
    collector.extend(inference_diagnostics);

    tracing::info!(
        tables = snapshot.len(),
        selected = candidates.len(),
        relations = relations.len(),
        strategy = %strategy,
        "derived relations"
    );

    if options.strict && collector.has_diagnostics() {
        return Err(GraphError::Strict {
            count: collector.count(),
        });
    }

    if relations.is_empty() {
        let scope = match strategy {
            RelationStrategy::Convention => "naming conventions",
            _ => "foreign keys",
        };
        return Err(GraphError::EmptyRelationSet {
            scope: format!("{} across {} table(s)", scope, candidates.len()),
        });
    }

    let roles = GraphClassifier::classify(relations.tables(), &relations);
    let database = options.database.as_deref().or(metadata.database.as_deref());
    let description = GraphDescriptionBuilder::new(&options.style)
        .mode(options.mode)
        .title(graph_title(database, strategy))
        .build(&relations, &roles)?;
    let cycles = find_cycles(&description);

    let diagnostics_truncated = collector.is_truncated();
    Ok(Generation {
        description,
        relations,
        roles,
        strategy,
        cycles,
        diagnostics: collector.into_vec(),
        diagnostics_truncated,
        table_count: snapshot.len(),
        selected_count: candidates.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnRecord, ForeignKeyRecord};

    fn metadata(with_fk: bool) -> SchemaMetadata {
        SchemaMetadata {
            database: Some("shop".to_string()),
            columns: vec![
                ColumnRecord::new("users", "id", "INT", true),
                ColumnRecord::new("orders", "id", "INT", true),
                ColumnRecord::new("orders", "user_id", "INT", false),
            ],
            foreign_keys: if with_fk {
                vec![ForeignKeyRecord::new("orders", &["user_id"], "users", &["id"])]
            } else {
                Vec::new()
            },
        }
    }

    #[test]
    fn test_auto_uses_foreign_keys_when_declared() {
        let gen = generate(&metadata(true), &GenerateOptions::default()).unwrap();
        assert_eq!(gen.strategy, RelationStrategy::ForeignKeys);
        assert_eq!(
            gen.description.title.as_deref(),
            Some("shop Schema (FK Based)")
        );
    }

    #[test]
    fn test_auto_falls_back_to_inference() {
        let gen = generate(&metadata(false), &GenerateOptions::default()).unwrap();
        assert_eq!(gen.strategy, RelationStrategy::Convention);
        assert_eq!(gen.relations.len(), 1);
        assert_eq!(
            gen.description.title.as_deref(),
            Some("shop Schema (Inferred)")
        );
    }

    #[test]
    fn test_forced_fk_without_keys_is_empty() {
        let options = GenerateOptions {
            strategy: RelationStrategy::ForeignKeys,
            ..Default::default()
        };
        let err = generate(&metadata(false), &options).unwrap_err();
        assert!(matches!(err, GraphError::EmptyRelationSet { .. }));
    }

    #[test]
    fn test_exclude_removes_edges() {
        let options = GenerateOptions {
            exclude: vec![Pattern::new("users").unwrap()],
            ..Default::default()
        };
        let err = generate(&metadata(true), &options).unwrap_err();
        assert_eq!(
            err,
            GraphError::EmptyRelationSet {
                scope: "foreign keys across 1 table(s)".to_string()
            }
        );
    }

    #[test]
    fn test_strict_fails_on_diagnostics() {
        let mut meta = metadata(true);
        meta.foreign_keys
            .push(ForeignKeyRecord::new("orders", &["user_id"], "ghosts", &["id"]));
        let options = GenerateOptions {
            strict: true,
            ..Default::default()
        };
        assert_eq!(
            generate(&meta, &options).unwrap_err(),
            GraphError::Strict { count: 1 }
        );

        let lenient = generate(&meta, &GenerateOptions::default()).unwrap();
        assert_eq!(lenient.diagnostics.len(), 1);
        assert_eq!(lenient.relations.len(), 1);
    }

    #[test]
    fn test_graph_title_without_database() {
        assert_eq!(
            graph_title(None, RelationStrategy::Convention),
            "Schema (Inferred)"
        );
    }
}
