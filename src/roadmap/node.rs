// src/roadmap/node.rs

//! Roadmap nodes and their kind-specific payloads.

use serde::Deserialize;

use crate::errors::{CoursemapError, Result};
use crate::types::{NodeId, NodeStatus, ResourceKind};

/// Canvas position; only the renderer cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A learning resource attached to a topic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Topic {
        progress_percent: u8,
        estimated_hours: f32,
        resources: Vec<Resource>,
    },
    Assessment {
        /// Present only once the assessment is completed.
        score_percent: Option<u8>,
    },
    Milestone,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Topic { .. } => "topic",
            NodeKind::Assessment { .. } => "assessment",
            NodeKind::Milestone => "milestone",
        }
    }
}

/// A vertex of the course roadmap.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapNode {
    pub id: NodeId,
    pub title: String,
    pub description: String,
    pub status: NodeStatus,
    pub position: Position,
    pub kind: NodeKind,
}

impl RoadmapNode {
    pub fn is_topic(&self) -> bool {
        matches!(self.kind, NodeKind::Topic { .. })
    }

    pub fn is_assessment(&self) -> bool {
        matches!(self.kind, NodeKind::Assessment { .. })
    }

    pub fn is_completed(&self) -> bool {
        self.status == NodeStatus::Completed
    }

    /// Topic progress, `None` for other kinds.
    pub fn progress_percent(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Topic {
                progress_percent, ..
            } => Some(progress_percent),
            _ => None,
        }
    }

    /// Assessment score, `None` for other kinds or while not completed.
    pub fn score_percent(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Assessment { score_percent } => score_percent,
            _ => None,
        }
    }

    pub fn resources(&self) -> &[Resource] {
        match &self.kind {
            NodeKind::Topic { resources, .. } => resources.as_slice(),
            _ => &[],
        }
    }

    /// Check the per-kind field invariants that do not depend on edges.
    pub(crate) fn check_fields(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoursemapError::Validation(
                "node id must not be empty".to_string(),
            ));
        }

        match &self.kind {
            NodeKind::Topic {
                progress_percent,
                estimated_hours,
                ..
            } => {
                if *progress_percent > 100 {
                    return Err(invalid_field(
                        &self.id,
                        format!("progress must be within 0..=100 (got {progress_percent})"),
                    ));
                }
                if !estimated_hours.is_finite() || *estimated_hours < 0.0 {
                    return Err(invalid_field(
                        &self.id,
                        format!("estimated_hours must be a finite value >= 0 (got {estimated_hours})"),
                    ));
                }
                match self.status {
                    NodeStatus::Completed if *progress_percent != 100 => {
                        return Err(invalid_field(
                            &self.id,
                            format!("completed topic must have progress 100 (got {progress_percent})"),
                        ));
                    }
                    NodeStatus::Locked if *progress_percent != 0 => {
                        return Err(invalid_field(
                            &self.id,
                            format!("locked topic must have progress 0 (got {progress_percent})"),
                        ));
                    }
                    _ => {}
                }
            }
            NodeKind::Assessment { score_percent } => match (self.status, score_percent) {
                (NodeStatus::Completed, None) => {
                    return Err(invalid_field(&self.id, "completed assessment has no score"));
                }
                (NodeStatus::Completed, Some(score)) if *score > 100 => {
                    return Err(invalid_field(
                        &self.id,
                        format!("score must be within 0..=100 (got {score})"),
                    ));
                }
                (status, Some(_)) if status != NodeStatus::Completed => {
                    return Err(invalid_field(
                        &self.id,
                        format!("assessment with status {status} must not carry a score"),
                    ));
                }
                _ => {}
            },
            NodeKind::Milestone => {}
        }

        Ok(())
    }
}

fn invalid_field(node: &str, reason: impl AsRef<str>) -> CoursemapError {
    CoursemapError::Validation(format!("node '{}': {}", node, reason.as_ref()))
}
