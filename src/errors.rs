// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoursemapError {
    /// Malformed roadmap, catalog or question set. Fatal at construction.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cycle detected in roadmap: {0}")]
    Cycle(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    /// A status-gated action that the current state does not allow.
    #[error("Invalid transition for '{subject}': {reason}")]
    InvalidTransition { subject: String, reason: String },

    #[error("Option '{option}' is not offered by question '{question}'")]
    InvalidAnswer { question: String, option: String },

    #[error("An answer is required for question '{0}' before advancing")]
    AnswerRequired(String),

    #[error("Quiz is already complete")]
    AlreadyComplete,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoursemapError {
    /// Build an [`CoursemapError::InvalidTransition`] from anything string-like.
    pub fn invalid_transition(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        CoursemapError::InvalidTransition {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// Errors raised while constructing a graph, catalog or question set.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoursemapError::Validation(_) | CoursemapError::Cycle(_)
        )
    }

    /// Rejected learner actions: the caller may keep using the same state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoursemapError::InvalidTransition { .. }
                | CoursemapError::InvalidAnswer { .. }
                | CoursemapError::AnswerRequired(_)
                | CoursemapError::AlreadyComplete
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CoursemapError>;
