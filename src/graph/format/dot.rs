//! Graphviz DOT format output.

use crate::graph::description::GraphDescription;
use crate::graph::style::StyleConfig;

/// Generate DOT with role-colored box nodes and optional column labels
pub fn to_dot(desc: &GraphDescription, style: &StyleConfig) -> String {
    let mut output = String::new();

    output.push_str("digraph Schema {\n");

    let mut graph_attrs: Vec<(&str, &str)> = vec![
        ("rankdir", style.layout.as_rankdir()),
        ("bgcolor", style.background.as_str()),
        ("pad", "0.5"),
        ("splines", style.splines.as_str()),
        ("nodesep", "0.8"),
        ("ranksep", "1"),
    ];
    if let Some(ref title) = desc.title {
        graph_attrs.push(("label", title.as_str()));
    }
    graph_attrs.extend([
        ("fontsize", "20"),
        ("fontname", style.font.as_str()),
        ("fontcolor", style.font_color.as_str()),
    ]);
    output.push_str(&format!("  graph [{}];\n", attr_list(&graph_attrs)));

    output.push_str(&format!(
        "  node [{}];\n",
        attr_list(&[
            ("shape", "box"),
            ("style", "filled,rounded"),
            ("fontname", style.font.as_str()),
            ("fontsize", "12"),
            ("margin", "0.4"),
        ])
    ));
    output.push_str(&format!(
        "  edge [{}];\n\n",
        attr_list(&[
            ("color", style.edge_color.as_str()),
            ("arrowsize", "0.8"),
            ("penwidth", "1.2"),
        ])
    ));

    for node in &desc.nodes {
        output.push_str(&format!(
            "  {} [{}];\n",
            escape_dot_id(&node.name),
            attr_list(&[("fillcolor", node.fill_color.as_str())])
        ));
    }

    if !desc.edges.is_empty() {
        output.push('\n');
    }

    for edge in &desc.edges {
        let arrow = format!(
            "{} -> {}",
            escape_dot_id(&edge.source),
            escape_dot_id(&edge.target)
        );
        match edge.label {
            // label doubles as tooltip
            Some(ref label) => output.push_str(&format!(
                "  {} [{}];\n",
                arrow,
                attr_list(&[("label", label.as_str()), ("tooltip", label.as_str())])
            )),
            None => output.push_str(&format!("  {};\n", arrow)),
        }
    }

    output.push_str("}\n");
    output
}

fn attr_list(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_dot_string(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape a string for use inside a quoted DOT string
fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// DOT keywords, matched case-insensitively; they are only valid IDs when quoted
const DOT_KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    let starts_with_digit = s.chars().next().is_some_and(|c| c.is_ascii_digit());
    let is_keyword = DOT_KEYWORDS.contains(&s.to_ascii_lowercase().as_str());
    if !s.is_empty()
        && !starts_with_digit
        && !is_keyword
        && s.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        s.to_string()
    } else {
        format!("\"{}\"", escape_dot_string(s))
    }
}
