// src/quiz/mod.rs

//! Assessment quiz: validated question sets and the session state machine
//! that walks through them and computes a weighted score.

pub mod question;
pub mod session;

pub use question::{QuestionSet, QuizQuestion};
pub use session::{CompletionCallback, QuizSession, QuizState};

/// Score at or above which a quiz counts as passed, unless the catalog
/// overrides it.
pub const DEFAULT_PASS_MARK: u8 = 70;
