// src/roadmap/status_step.rs

//! Result type for a single status engine step.

use crate::types::NodeId;

/// What changed when the status engine applied one learner event.
///
/// Useful for callers that want to highlight freshly unlocked nodes, and for
/// tests that step the roadmap manually.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusStep {
    /// Node that reached `Completed` in this step (also set when an already
    /// completed node was re-completed).
    pub completed: Option<NodeId>,
    /// Node whose progress changed without completing.
    pub progressed: Option<NodeId>,
    /// Nodes that moved from `Locked` to `Available`, in topological order.
    pub newly_available: Vec<NodeId>,
    /// Whether every node of the roadmap is now completed.
    pub course_completed: bool,
}

impl StatusStep {
    /// A step that changed nothing.
    pub fn unchanged() -> Self {
        Self::default()
    }
}
