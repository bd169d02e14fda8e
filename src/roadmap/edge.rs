// src/roadmap/edge.rs

use crate::types::NodeId;

/// Prerequisite edge: `target` stays locked until `source` is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    /// Drawn animated by the renderer. No effect on gating.
    pub emphasis: bool,
    /// Stroke colour hint for the renderer.
    pub stroke: Option<String>,
}

impl RoadmapEdge {
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            emphasis: false,
            stroke: None,
        }
    }
}
