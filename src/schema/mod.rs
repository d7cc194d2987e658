//! Schema snapshot model.
//!
//! This module provides:
//! - Raw column and foreign-key records as supplied by an introspection collaborator
//! - The immutable [`SchemaSnapshot`] built once per generation call
//! - A builder that validates foreign keys and reports dangling metadata

mod builder;
mod records;

pub use builder::*;
pub use records::*;

use std::collections::BTreeMap;
use std::fmt;

/// Position of a column within its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub u16);

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnId({})", self.0)
    }
}

/// Column definition within a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Declared type, kept opaque
    pub col_type: String,
    /// Position in table (0-indexed, schema order)
    pub ordinal: ColumnId,
    /// Whether this column is part of the primary key
    pub is_primary_key: bool,
}

/// A foreign key constraint as declared by the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredForeignKey {
    /// Owning table
    pub table: String,
    /// Local columns, paired index-wise with `referred_columns`
    pub constrained_columns: Vec<String>,
    /// Referenced table
    pub referred_table: String,
    /// Referenced columns
    pub referred_columns: Vec<String>,
}

impl DeclaredForeignKey {
    /// Iterate (constrained, referred) column pairs
    pub fn column_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constrained_columns
            .iter()
            .zip(self.referred_columns.iter())
            .map(|(c, r)| (c.as_str(), r.as_str()))
    }

    pub fn is_self_reference(&self) -> bool {
        self.table == self.referred_table
    }
}

/// A table with its columns, primary key and valid foreign keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name, unique within a snapshot
    pub name: String,
    /// Columns in schema order
    pub columns: Vec<Column>,
    /// Primary-key column names in schema order (empty, single or composite)
    pub primary_key: Vec<String>,
    /// Foreign keys that passed validation
    pub foreign_keys: Vec<DeclaredForeignKey>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Get a column by exact name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// Check if a column is part of the primary key
    pub fn is_pk_column(&self, name: &str) -> bool {
        self.primary_key.iter().any(|pk| pk == name)
    }

    /// The primary key column name when the key has exactly one column
    pub fn single_primary_key(&self) -> Option<&str> {
        match self.primary_key.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn has_composite_primary_key(&self) -> bool {
        self.primary_key.len() > 1
    }
}

/// Immutable snapshot of one database's tables, built once per generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    tables: BTreeMap<String, Table>,
}

impl SchemaSnapshot {
    pub(crate) fn from_tables(tables: BTreeMap<String, Table>) -> Self {
        Self { tables }
    }

    /// Get table by exact name
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Iterate tables in name order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Table names in name order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Get the number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total column count across all tables
    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    /// Number of valid declared foreign keys
    pub fn foreign_key_count(&self) -> usize {
        self.tables.values().map(|t| t.foreign_keys.len()).sum()
    }

    pub fn has_foreign_keys(&self) -> bool {
        self.tables.values().any(|t| !t.foreign_keys.is_empty())
    }
}
