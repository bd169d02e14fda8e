// src/view/mod.rs

//! Course view: one learner looking at one course.
//!
//! The view owns the roadmap's [`StatusEngine`] and the course quiz session.
//! UI interactions arrive as [`ViewEvent`]s and are applied synchronously by
//! [`CourseView::step`]. When the quiz completes, its score is reported to
//! the status engine as a completion of the quiz's assessment node.
//!
//! The view performs no IO after [`CourseView::open`]; dropping it discards
//! all state.

pub mod course;

use crate::quiz::QuizState;
use crate::roadmap::{CompletionEvent, ProgressEvent, StatusStep};

pub use course::CourseView;

/// Learner interactions handled by a [`CourseView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SelectAnswer { question_id: String, option: String },
    /// "Next question" / "Finish quiz".
    Advance,
    /// "Previous".
    Retreat,
    Progress(ProgressEvent),
    Complete(CompletionEvent),
}

/// What a single [`ViewEvent`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStep {
    /// Quiz state after the event, for quiz events.
    pub quiz: Option<QuizState>,
    /// Roadmap changes, when the event reached the status engine.
    pub roadmap: Option<StatusStep>,
}
