//! Warning-level diagnostics.
//!
//! Collects metadata problems and best-effort inference decisions that do not
//! stop a graph from being generated, so callers can surface them for review.

use crate::error::MalformedSchemaError;
use serde::Serialize;
use std::fmt;

/// A non-fatal problem noticed while building a graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// A declared foreign key was excluded from extraction
    MalformedSchema(MalformedSchemaError),
    /// More than one candidate table matched before the tie-break
    AmbiguousInference {
        table: String,
        column: String,
        chosen: String,
        alternatives: Vec<String>,
    },
    /// The same column was supplied twice for one table; the first record wins
    DuplicateColumn { table: String, column: String },
    /// A table already holds the maximum number of addressable columns
    ColumnLimitExceeded { table: String, column: String },
}

impl Diagnostic {
    /// Short machine-readable kind, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::MalformedSchema(_) => "malformed_schema",
            Diagnostic::AmbiguousInference { .. } => "ambiguous_inference",
            Diagnostic::DuplicateColumn { .. } => "duplicate_column",
            Diagnostic::ColumnLimitExceeded { .. } => "column_limit_exceeded",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedSchema(err) => write!(f, "{}", err),
            Diagnostic::AmbiguousInference {
                table,
                column,
                chosen,
                alternatives,
            } => write!(
                f,
                "ambiguous inference for {}.{}: chose '{}' over {}",
                table,
                column,
                chosen,
                alternatives
                    .iter()
                    .map(|a| format!("'{}'", a))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Diagnostic::DuplicateColumn { table, column } => {
                write!(f, "duplicate column record {}.{} ignored", table, column)
            }
            Diagnostic::ColumnLimitExceeded { table, column } => write!(
                f,
                "column {}.{} ignored: table exceeds {} columns",
                table,
                column,
                u32::from(u16::MAX) + 1
            ),
        }
    }
}

/// Serializable view of a diagnostic for JSON output
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct DiagnosticJson {
    pub kind: String,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticJson {
    fn from(d: &Diagnostic) -> Self {
        Self {
            kind: d.kind().to_string(),
            message: d.to_string(),
        }
    }
}

/// Collects diagnostics during a generation call
#[derive(Debug)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    max_diagnostics: usize,
    truncated: bool,
}

impl Default for DiagnosticCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            diagnostics: Vec::new(),
            max_diagnostics: limit,
            truncated: false,
        }
    }

    /// Add a diagnostic, dropping exact duplicates
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        if self.diagnostics.len() >= self.max_diagnostics {
            self.truncated = true;
            return;
        }
        tracing::warn!(kind = diagnostic.kind(), "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        for d in diagnostics {
            self.add(d);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Print a human-readable summary of diagnostics to stderr
pub fn print_summary(diagnostics: &[Diagnostic], truncated: bool) {
    if diagnostics.is_empty() {
        return;
    }

    eprintln!("\nDiagnostics ({}):", diagnostics.len());
    for d in diagnostics {
        eprintln!("  ⚠ {}", d);
    }

    if truncated {
        eprintln!("  ... (additional diagnostics truncated)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(column: &str) -> Diagnostic {
        Diagnostic::DuplicateColumn {
            table: "users".to_string(),
            column: column.to_string(),
        }
    }

    #[test]
    fn test_collector_dedupes() {
        let mut c = DiagnosticCollector::new();
        c.add(duplicate("id"));
        c.add(duplicate("id"));
        c.add(duplicate("email"));
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn test_collector_limit() {
        let mut c = DiagnosticCollector::with_limit(1);
        c.add(duplicate("a"));
        c.add(duplicate("b"));
        assert_eq!(c.count(), 1);
        assert!(c.is_truncated());
    }

    #[test]
    fn test_ambiguous_display() {
        let d = Diagnostic::AmbiguousInference {
            table: "dish".to_string(),
            column: "category_id".to_string(),
            chosen: "category".to_string(),
            alternatives: vec!["categorys".to_string()],
        };
        assert_eq!(
            d.to_string(),
            "ambiguous inference for dish.category_id: chose 'category' over 'categorys'"
        );
        assert_eq!(d.kind(), "ambiguous_inference");
    }

    #[test]
    fn test_column_limit_display() {
        let d = Diagnostic::ColumnLimitExceeded {
            table: "wide".to_string(),
            column: "overflow".to_string(),
        };
        assert_eq!(
            d.to_string(),
            "column wide.overflow ignored: table exceeds 65536 columns"
        );
        assert_eq!(d.kind(), "column_limit_exceeded");
    }
}
