//! Render styling: role colors and graph-level attributes.

use crate::graph::classify::NodeRole;
use crate::graph::format::Layout;
use serde::{Deserialize, Serialize};

/// Fill color per node role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleColors {
    pub source: String,
    pub sink: String,
    pub hub: String,
    pub isolated: String,
    pub default: String,
}

impl Default for RoleColors {
    fn default() -> Self {
        Self {
            source: "#FFDDC1".to_string(),
            sink: "#E0BBE4".to_string(),
            hub: "#D1FFBD".to_string(),
            isolated: "#DDDDDD".to_string(),
            default: "#87CEEB".to_string(),
        }
    }
}

impl RoleColors {
    pub fn get(&self, role: NodeRole) -> &str {
        match role {
            NodeRole::Source => &self.source,
            NodeRole::Sink => &self.sink,
            NodeRole::Hub => &self.hub,
            NodeRole::Isolated => &self.isolated,
            NodeRole::Default => &self.default,
        }
    }
}

/// Caller-supplied styling handed through to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub layout: Layout,
    pub splines: String,
    pub font: String,
    pub background: String,
    pub font_color: String,
    pub edge_color: String,
    pub colors: RoleColors,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            layout: Layout::TB,
            splines: "ortho".to_string(),
            font: "Helvetica, Arial, sans-serif".to_string(),
            background: "#F0F0F0".to_string(),
            font_color: "#333333".to_string(),
            edge_color: "#888888".to_string(),
            colors: RoleColors::default(),
        }
    }
}

impl StyleConfig {
    /// Fill color for a role
    pub fn fill_color(&self, role: NodeRole) -> &str {
        self.colors.get(role)
    }
}
