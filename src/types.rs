use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Canonical roadmap node identifier.
pub type NodeId = String;

/// Opaque course key (e.g. `"cs101"`). Never parsed.
pub type CourseId = String;

/// Lifecycle status of a roadmap node.
///
/// Nodes only ever move forward: `Locked -> Available -> InProgress -> Completed`
/// (topics may skip `InProgress`, assessments and milestones always do).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Locked,
    Available,
    InProgress,
    Completed,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Locked => "locked",
            NodeStatus::Available => "available",
            NodeStatus::InProgress => "in_progress",
            NodeStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "locked" => Ok(NodeStatus::Locked),
            "available" => Ok(NodeStatus::Available),
            "in_progress" | "in-progress" => Ok(NodeStatus::InProgress),
            "completed" => Ok(NodeStatus::Completed),
            other => Err(format!(
                "invalid node status: {other} (expected \"locked\", \"available\", \"in_progress\" or \"completed\")"
            )),
        }
    }
}

/// Role stored in the session flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }

    /// Route of this role's dashboard.
    pub fn dashboard_path(&self) -> String {
        format!("/{}/dashboard", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            other => Err(format!(
                "invalid role: {other} (expected \"student\" or \"professor\")"
            )),
        }
    }
}

/// Kind of a learning resource attached to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Video,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Pdf => f.write_str("pdf"),
            ResourceKind::Video => f.write_str("video"),
        }
    }
}

/// Presentation of a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}
