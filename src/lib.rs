//! Derive directed table-relationship graphs from relational schema metadata.
//!
//! The engine is pure and synchronous: callers supply already-fetched column and
//! foreign-key records and receive a renderer-agnostic [`graph::GraphDescription`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod json_schema;
pub mod pipeline;
pub mod relation;
pub mod schema;

pub use error::{GraphError, MalformedSchemaError};
pub use pipeline::{generate, GenerateOptions, Generation};
