//! Mermaid flowchart format output.
//!
//! Node IDs are positional (`n0`, `n1`, ...) so that distinct table names never
//! collide after sanitizing and never clash with Mermaid keywords. The table
//! name is carried in the quoted label.

use crate::graph::classify::NodeRole;
use crate::graph::description::GraphDescription;
use crate::graph::style::StyleConfig;
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Generate a Mermaid flowchart with one class per node role
pub fn to_mermaid(desc: &GraphDescription, style: &StyleConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("flowchart {}\n", style.layout.as_rankdir()));

    let ids: AHashMap<&str, String> = desc
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.name.as_str(), format!("n{}", i)))
        .collect();

    for (i, node) in desc.nodes.iter().enumerate() {
        output.push_str(&format!(
            "    n{}[\"{}\"]:::{}\n",
            i,
            escape_mermaid_label(&node.name),
            class_name(node.role)
        ));
    }

    if !desc.edges.is_empty() {
        output.push('\n');
    }

    for edge in &desc.edges {
        let (Some(from), Some(to)) = (
            ids.get(edge.source.as_str()),
            ids.get(edge.target.as_str()),
        ) else {
            continue;
        };
        match edge.label {
            Some(ref label) => output.push_str(&format!(
                "    {} -->|\"{}\"| {}\n",
                from,
                escape_mermaid_label(label),
                to
            )),
            None => output.push_str(&format!("    {} --> {}\n", from, to)),
        }
    }

    let roles: BTreeSet<NodeRole> = desc.nodes.iter().map(|n| n.role).collect();
    if !roles.is_empty() {
        output.push('\n');
    }
    for role in roles {
        output.push_str(&format!(
            "    classDef {} fill:{},stroke:{}\n",
            class_name(role),
            style.fill_color(role),
            style.edge_color
        ));
    }

    output
}

/// Class name for a role; `default` is reserved by Mermaid and restyles every node
fn class_name(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Default => "unclassified",
        other => other.as_str(),
    }
}

/// Escape a quoted Mermaid label
fn escape_mermaid_label(s: &str) -> String {
    s.replace('"', "#quot;")
}
