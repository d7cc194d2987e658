//! Output format implementations for graph descriptions.

mod dot;
pub(crate) mod json;
mod mermaid;

pub use dot::to_dot;
pub use json::{build_graph_json, to_json, GraphJson, GraphStats};
pub use mermaid::to_mermaid;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for graph export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Graphviz DOT format
    #[default]
    Dot,
    /// Mermaid flowchart format
    Mermaid,
    /// JSON format for programmatic use
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Valid options: dot, mermaid, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "dot" | "gv" => Some(OutputFormat::Dot),
            "mmd" | "mermaid" => Some(OutputFormat::Mermaid),
            "json" => Some(OutputFormat::Json),
            "png" | "svg" | "pdf" => Some(OutputFormat::Dot), // Will be rendered
            _ => None,
        }
    }
}

/// Layout direction for diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Left to right
    LR,
    /// Top to bottom
    #[default]
    TB,
}

impl Layout {
    /// Graphviz `rankdir` / Mermaid direction keyword
    pub fn as_rankdir(self) -> &'static str {
        match self {
            Layout::LR => "LR",
            Layout::TB => "TB",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "left-right" | "horizontal" => Ok(Layout::LR),
            "tb" | "td" | "top-bottom" | "top-down" | "vertical" => Ok(Layout::TB),
            _ => Err(format!("Unknown layout: {}. Valid options: lr, tb", s)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::LR => write!(f, "lr"),
            Layout::TB => write!(f, "tb"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("gv"), Some(OutputFormat::Dot));
        assert_eq!(OutputFormat::from_extension("PNG"), Some(OutputFormat::Dot));
        assert_eq!(OutputFormat::from_extension("mmd"), Some(OutputFormat::Mermaid));
        assert_eq!(OutputFormat::from_extension("html"), None);
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("TD".parse(), Ok(Layout::TB));
        assert_eq!("lr".parse(), Ok(Layout::LR));
        assert!("diagonal".parse::<Layout>().is_err());
    }
}
