//! Knowledge-graph dataset as served by the store.
//! Layout state (positions, velocities) lives in `spacebio-kg`, not here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Organism,
    Experiment,
    Mission,
    Result,
    #[serde(other)]
    Unknown,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Organism   => "organism",
            NodeCategory::Experiment => "experiment",
            NodeCategory::Mission    => "mission",
            NodeCategory::Result     => "result",
            NodeCategory::Unknown    => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub category: NodeCategory,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: NodeCategory) -> Self {
        Self { id: id.into(), label: label.into(), category }
    }
}

/// Directed edge between two node ids. Endpoints are resolved lazily;
/// an id without a matching node is tolerated and the edge is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
