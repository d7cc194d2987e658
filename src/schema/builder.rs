//! Snapshot construction from raw metadata records.
//!
//! Column records define the tables. Foreign keys are validated against them;
//! a dangling foreign key is excluded and reported, never silently dropped and
//! never fatal.

use super::{
    Column, ColumnId, ColumnRecord, DeclaredForeignKey, ForeignKeyRecord, SchemaSnapshot, Table,
};
use crate::diagnostics::Diagnostic;
use crate::error::{MalformedReason, MalformedSchemaError};
use std::collections::BTreeMap;

/// A snapshot together with the diagnostics raised while building it
#[derive(Debug, Clone)]
pub struct SnapshotBuild {
    pub snapshot: SchemaSnapshot,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builder for constructing a snapshot from introspection records
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    tables: BTreeMap<String, Table>,
    pending_fks: Vec<ForeignKeyRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl SnapshotBuilder {
    /// Create a new snapshot builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot in one call
    pub fn from_records(columns: &[ColumnRecord], foreign_keys: &[ForeignKeyRecord]) -> SnapshotBuild {
        let mut builder = Self::new();
        for col in columns {
            builder.add_column(col);
        }
        for fk in foreign_keys {
            builder.add_foreign_key(fk.clone());
        }
        builder.build()
    }

    /// Add one column record, creating its table on first sight
    pub fn add_column(&mut self, record: &ColumnRecord) {
        let table = self
            .tables
            .entry(record.table.clone())
            .or_insert_with(|| Table::new(record.table.clone()));

        if table.has_column(&record.column) {
            self.diagnostics.push(Diagnostic::DuplicateColumn {
                table: record.table.clone(),
                column: record.column.clone(),
            });
            return;
        }

        let Some(ordinal) = next_ordinal(table.columns.len()) else {
            self.diagnostics.push(Diagnostic::ColumnLimitExceeded {
                table: record.table.clone(),
                column: record.column.clone(),
            });
            return;
        };
        table.columns.push(Column {
            name: record.column.clone(),
            col_type: record.col_type.clone(),
            ordinal,
            is_primary_key: record.is_primary_key,
        });
        if record.is_primary_key {
            table.primary_key.push(record.column.clone());
        }
    }

    /// Queue a foreign key; it is validated in [`build`](Self::build) once all columns are known
    pub fn add_foreign_key(&mut self, record: ForeignKeyRecord) {
        self.pending_fks.push(record);
    }

    /// Validate foreign keys and freeze the snapshot
    pub fn build(mut self) -> SnapshotBuild {
        let pending = std::mem::take(&mut self.pending_fks);

        for record in pending {
            match validate_foreign_key(&self.tables, &record) {
                Ok(()) => {
                    if let Some(table) = self.tables.get_mut(&record.table) {
                        table.foreign_keys.push(DeclaredForeignKey {
                            table: record.table,
                            constrained_columns: record.constrained_columns,
                            referred_table: record.referred_table,
                            referred_columns: record.referred_columns,
                        });
                    }
                }
                Err(reason) => {
                    self.diagnostics
                        .push(Diagnostic::MalformedSchema(MalformedSchemaError {
                            table: record.table,
                            referred_table: record.referred_table,
                            reason,
                        }));
                }
            }
        }

        tracing::debug!(
            tables = self.tables.len(),
            diagnostics = self.diagnostics.len(),
            "built schema snapshot"
        );

        SnapshotBuild {
            snapshot: SchemaSnapshot::from_tables(self.tables),
            diagnostics: self.diagnostics,
        }
    }
}

/// Ordinal for the column appended after `len` existing ones, if it fits
fn next_ordinal(len: usize) -> Option<ColumnId> {
    u16::try_from(len).ok().map(ColumnId)
}

fn validate_foreign_key(
    tables: &BTreeMap<String, Table>,
    record: &ForeignKeyRecord,
) -> Result<(), MalformedReason> {
    if record.constrained_columns.len() != record.referred_columns.len() {
        return Err(MalformedReason::ArityMismatch {
            constrained: record.constrained_columns.len(),
            referred: record.referred_columns.len(),
        });
    }
    if record.constrained_columns.is_empty() {
        return Err(MalformedReason::NoColumns);
    }

    let owner = tables
        .get(&record.table)
        .ok_or_else(|| MalformedReason::UnknownTable(record.table.clone()))?;
    let referred = tables
        .get(&record.referred_table)
        .ok_or_else(|| MalformedReason::UnknownReferencedTable(record.referred_table.clone()))?;

    if let Some(missing) = record
        .constrained_columns
        .iter()
        .find(|c| !owner.has_column(c))
    {
        return Err(MalformedReason::UnknownColumn(missing.clone()));
    }
    if let Some(missing) = record
        .referred_columns
        .iter()
        .find(|c| !referred.has_column(c))
    {
        return Err(MalformedReason::UnknownReferencedColumn(missing.clone()));
    }

    Ok(())
}
