//! Error types for graph generation.
//!
//! Only [`GraphError`] aborts a generation call. [`MalformedSchemaError`] describes
//! dangling metadata and always travels as a diagnostic next to a usable result.

use std::fmt;
use thiserror::Error;

/// Errors that abort the current generation call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Extraction or inference produced no edges for the requested scope
    #[error("no relations found ({scope}); nothing to draw")]
    EmptyRelationSet { scope: String },
    /// Strict mode was requested and diagnostics were produced
    #[error("{count} diagnostic(s) reported in strict mode")]
    Strict { count: usize },
}

/// Why a declared foreign key could not be used
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MalformedReason {
    /// The owning table has no column records
    UnknownTable(String),
    /// The referenced table has no column records
    UnknownReferencedTable(String),
    /// A constrained column is missing from the owning table
    UnknownColumn(String),
    /// A referenced column is missing from the referenced table
    UnknownReferencedColumn(String),
    /// Constrained and referenced column lists differ in length
    ArityMismatch { constrained: usize, referred: usize },
    /// The foreign key lists no columns at all
    NoColumns,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::UnknownTable(t) => write!(f, "owning table '{}' is unknown", t),
            MalformedReason::UnknownReferencedTable(t) => {
                write!(f, "referenced table '{}' is unknown", t)
            }
            MalformedReason::UnknownColumn(c) => write!(f, "column '{}' does not exist", c),
            MalformedReason::UnknownReferencedColumn(c) => {
                write!(f, "referenced column '{}' does not exist", c)
            }
            MalformedReason::ArityMismatch {
                constrained,
                referred,
            } => write!(
                f,
                "{} constrained column(s) but {} referenced column(s)",
                constrained, referred
            ),
            MalformedReason::NoColumns => write!(f, "no columns listed"),
        }
    }
}

/// A foreign-key record that references a table or column absent from the column records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("malformed foreign key on '{table}' -> '{referred_table}': {reason}")]
pub struct MalformedSchemaError {
    pub table: String,
    pub referred_table: String,
    pub reason: MalformedReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_relation_set_message() {
        let err = GraphError::EmptyRelationSet {
            scope: "foreign keys".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no relations found (foreign keys); nothing to draw"
        );
    }

    #[test]
    fn test_malformed_message() {
        let err = MalformedSchemaError {
            table: "orders".to_string(),
            referred_table: "users".to_string(),
            reason: MalformedReason::UnknownReferencedColumn("uid".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "malformed foreign key on 'orders' -> 'users': referenced column 'uid' does not exist"
        );
    }
}
