// src/roadmap/status.rs

//! Status engine: applies learner events to a roadmap and unlocks whatever
//! the event makes reachable.

use tracing::{debug, info, warn};

use crate::errors::{CoursemapError, Result};
use crate::roadmap::graph::RoadmapGraph;
use crate::roadmap::node::{NodeKind, RoadmapNode};
use crate::roadmap::status_step::StatusStep;
use crate::types::{NodeId, NodeStatus};

/// Result carried by a completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionResult {
    /// Score of a finished assessment, 0..=100.
    Score(u8),
    /// A topic or milestone was finished.
    Finished,
}

/// Externally reported learner event: `node_id` is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub node_id: NodeId,
    pub result: CompletionResult,
}

impl CompletionEvent {
    pub fn assessment(node_id: impl Into<NodeId>, score_percent: u8) -> Self {
        Self {
            node_id: node_id.into(),
            result: CompletionResult::Score(score_percent),
        }
    }

    pub fn finished(node_id: impl Into<NodeId>) -> Self {
        Self {
            node_id: node_id.into(),
            result: CompletionResult::Finished,
        }
    }
}

/// Partial progress on a topic. Reaching 100 completes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub node_id: NodeId,
    pub percent: u8,
}

impl ProgressEvent {
    pub fn new(node_id: impl Into<NodeId>, percent: u8) -> Self {
        Self {
            node_id: node_id.into(),
            percent,
        }
    }
}

/// Apply a completion event and return the updated roadmap.
///
/// The input graph is never modified; a rejected event leaves the caller
/// with exactly what it had. Graphs that did not come from a
/// [`StatusEngine`] are settled first: contradictory statuses are rejected
/// and ready locked nodes (roots included) become available.
pub fn apply_completion(graph: &RoadmapGraph, event: &CompletionEvent) -> Result<RoadmapGraph> {
    let mut settled = graph.clone();
    settle(&mut settled)?;
    completion_step(&settled, event).map(|(next, _)| next)
}

/// Owns the roadmap of one course view and is the only writer of node
/// status, progress and score.
#[derive(Debug, Clone)]
pub struct StatusEngine {
    graph: RoadmapGraph,
}

impl StatusEngine {
    /// Take ownership of a roadmap.
    ///
    /// Rejects graphs where a node is past `Locked` while one of its
    /// prerequisites is not completed, then unlocks every locked node whose
    /// prerequisites are all completed (roots included).
    pub fn new(graph: RoadmapGraph) -> Result<Self> {
        let mut graph = graph;
        let unlocked = settle(&mut graph)?;
        if !unlocked.is_empty() {
            debug!(?unlocked, "status engine: unlocked nodes on load");
        }

        Ok(Self { graph })
    }

    pub fn graph(&self) -> &RoadmapGraph {
        &self.graph
    }

    pub fn into_graph(self) -> RoadmapGraph {
        self.graph
    }

    pub fn status_of(&self, node_id: &str) -> Option<NodeStatus> {
        self.graph.node(node_id).map(|n| n.status)
    }

    /// Whether a UI should offer actions on this node. Locked and unknown
    /// nodes are not actionable.
    pub fn is_actionable(&self, node_id: &str) -> bool {
        matches!(
            self.status_of(node_id),
            Some(NodeStatus::Available | NodeStatus::InProgress | NodeStatus::Completed)
        )
    }

    pub fn is_course_complete(&self) -> bool {
        course_completed(&self.graph)
    }

    /// Apply a completion event in place.
    pub fn step_completion(&mut self, event: &CompletionEvent) -> Result<StatusStep> {
        let (next, step) = completion_step(&self.graph, event)?;
        self.graph = next;
        Ok(step)
    }

    /// Record partial progress on a topic.
    ///
    /// - `Available` topics move to `InProgress`.
    /// - Progress never decreases; a lower value keeps the current one.
    /// - 100 completes the topic exactly like [`CompletionEvent::finished`].
    /// - Progress on an already completed topic is ignored.
    pub fn step_progress(&mut self, event: &ProgressEvent) -> Result<StatusStep> {
        let node = self
            .graph
            .node(&event.node_id)
            .cloned()
            .ok_or_else(|| CoursemapError::NodeNotFound(event.node_id.clone()))?;

        if event.percent > 100 {
            return Err(CoursemapError::Validation(format!(
                "progress for '{}' must be within 0..=100 (got {})",
                event.node_id, event.percent
            )));
        }

        let (progress_percent, estimated_hours, resources) = match &node.kind {
            NodeKind::Topic {
                progress_percent,
                estimated_hours,
                resources,
            } => (*progress_percent, *estimated_hours, resources.clone()),
            other => {
                return Err(CoursemapError::invalid_transition(
                    &node.id,
                    format!("progress updates apply to topics only, not {}", other.label()),
                ));
            }
        };

        match node.status {
            NodeStatus::Locked => {
                warn!(node = %node.id, "progress reported on locked topic; rejecting");
                return Err(CoursemapError::invalid_transition(
                    &node.id,
                    "prerequisites are not completed",
                ));
            }
            NodeStatus::Completed => {
                debug!(node = %node.id, "progress on completed topic ignored");
                return Ok(StatusStep::unchanged());
            }
            NodeStatus::Available | NodeStatus::InProgress => {}
        }

        if event.percent == 100 {
            return self.step_completion(&CompletionEvent::finished(node.id));
        }

        if event.percent < progress_percent {
            debug!(
                node = %node.id,
                current = progress_percent,
                reported = event.percent,
                "progress never decreases; keeping current value"
            );
        }

        let percent = progress_percent.max(event.percent);
        let updated = RoadmapNode {
            status: NodeStatus::InProgress,
            kind: NodeKind::Topic {
                progress_percent: percent,
                estimated_hours,
                resources,
            },
            ..node
        };
        let id = updated.id.clone();
        self.graph.replace_node(updated)?;
        debug!(node = %id, progress = percent, "topic progressed");

        Ok(StatusStep {
            progressed: Some(id),
            ..StatusStep::unchanged()
        })
    }
}

fn completion_step(
    graph: &RoadmapGraph,
    event: &CompletionEvent,
) -> Result<(RoadmapGraph, StatusStep)> {
    let node = graph
        .node(&event.node_id)
        .ok_or_else(|| CoursemapError::NodeNotFound(event.node_id.clone()))?;

    if node.status == NodeStatus::Locked {
        warn!(node = %node.id, "completion reported on locked node; rejecting");
        return Err(CoursemapError::invalid_transition(
            &node.id,
            "prerequisites are not completed",
        ));
    }

    let was_completed = node.is_completed();
    let completed = completed_record(node, event.result)?;

    let mut next = graph.clone();
    next.replace_node(completed)?;

    if was_completed {
        debug!(node = %event.node_id, "node re-completed; result overwritten");
    } else {
        info!(node = %event.node_id, "node completed");
    }

    let newly_available = unlock_forward(&mut next)?;
    let course_completed = course_completed(&next);

    Ok((
        next,
        StatusStep {
            completed: Some(event.node_id.clone()),
            progressed: None,
            newly_available,
            course_completed,
        },
    ))
}

fn completed_record(node: &RoadmapNode, result: CompletionResult) -> Result<RoadmapNode> {
    let kind = match (&node.kind, result) {
        (NodeKind::Assessment { .. }, CompletionResult::Score(score)) => {
            if score > 100 {
                return Err(CoursemapError::Validation(format!(
                    "score for '{}' must be within 0..=100 (got {score})",
                    node.id
                )));
            }
            NodeKind::Assessment {
                score_percent: Some(score),
            }
        }
        (NodeKind::Assessment { .. }, CompletionResult::Finished) => {
            return Err(CoursemapError::invalid_transition(
                &node.id,
                "an assessment can only be completed with a score",
            ));
        }
        (
            NodeKind::Topic {
                estimated_hours,
                resources,
                ..
            },
            CompletionResult::Finished,
        ) => NodeKind::Topic {
            progress_percent: 100,
            estimated_hours: *estimated_hours,
            resources: resources.clone(),
        },
        (NodeKind::Milestone, CompletionResult::Finished) => NodeKind::Milestone,
        (other, CompletionResult::Score(_)) => {
            return Err(CoursemapError::invalid_transition(
                &node.id,
                format!("a {} cannot be completed with a score", other.label()),
            ));
        }
    };

    Ok(RoadmapNode {
        status: NodeStatus::Completed,
        kind,
        ..node.clone()
    })
}

/// Single forward pass in topological order: every locked node whose
/// prerequisites are all completed becomes available.
///
/// Unlocking never completes anything, so one pass is enough. Returns the
/// unlocked ids in topological order.
fn unlock_forward(graph: &mut RoadmapGraph) -> Result<Vec<NodeId>> {
    // Decide first, then mutate.
    let candidates: Vec<RoadmapNode> = graph
        .topological_order()
        .filter(|n| n.status == NodeStatus::Locked && graph.prerequisites_completed(&n.id))
        .cloned()
        .collect();

    let mut unlocked = Vec::with_capacity(candidates.len());
    for node in candidates {
        let id = node.id.clone();
        graph.replace_node(RoadmapNode {
            status: NodeStatus::Available,
            ..node
        })?;
        info!(node = %id, "prerequisites completed; node unlocked");
        unlocked.push(id);
    }

    Ok(unlocked)
}

/// Bring a freshly built graph in line with the gating rule.
fn settle(graph: &mut RoadmapGraph) -> Result<Vec<NodeId>> {
    check_gating(graph)?;
    unlock_forward(graph)
}

fn check_gating(graph: &RoadmapGraph) -> Result<()> {
    for node in graph.nodes() {
        if node.status == NodeStatus::Locked {
            continue;
        }
        let pending: Vec<&str> = graph
            .prerequisites_of(&node.id)
            .into_iter()
            .filter(|p| !p.is_completed())
            .map(|p| p.id.as_str())
            .collect();
        if !pending.is_empty() {
            return Err(CoursemapError::Validation(format!(
                "node '{}' is {} but prerequisites {:?} are not completed",
                node.id, node.status, pending
            )));
        }
    }
    Ok(())
}

fn course_completed(graph: &RoadmapGraph) -> bool {
    graph.nodes().iter().all(|n| n.is_completed())
}
