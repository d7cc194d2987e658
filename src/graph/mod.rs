//! Relationship graph generation.
//!
//! This module provides:
//! - Node classification by in/out degree (source, hub, sink)
//! - Caller-supplied styling per node role
//! - A deterministic, renderer-agnostic graph description
//! - Cycle detection using Tarjan's SCC algorithm
//! - Output formats: DOT (Graphviz), Mermaid, JSON

pub mod analysis;
pub mod classify;
pub mod description;
pub mod format;
pub mod style;

pub use analysis::{cyclic_tables, find_cycles, Cycle};
pub use classify::{Degree, GraphClassifier, NodeRole};
pub use description::{EdgeEntry, GraphDescription, GraphDescriptionBuilder, NodeEntry, RenderMode};
pub use format::{build_graph_json, to_dot, to_json, to_mermaid, GraphJson, Layout, OutputFormat};
pub use style::{RoleColors, StyleConfig};
