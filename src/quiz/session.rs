// src/quiz/session.rs

//! Quiz session state machine.
//!
//! ```text
//! InProgress(i) --select_answer--> InProgress(i)
//! InProgress(i) --advance-------> InProgress(i + 1)      (answer for i recorded)
//! InProgress(last) --advance----> Completed(score)
//! InProgress(i) --retreat-------> InProgress(i - 1)      (i > 0)
//! Completed(_)  --anything------> AlreadyComplete
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, warn};

use crate::errors::{CoursemapError, Result};
use crate::quiz::question::{QuestionSet, QuizQuestion};

/// Invoked once with the integer score when the session completes.
pub type CompletionCallback = Box<dyn FnMut(u8) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    InProgress { current_index: usize },
    Completed { score_percent: u8 },
}

pub struct QuizSession {
    questions: QuestionSet,
    /// Question id -> selected option; at most one entry per question.
    answers: HashMap<String, String>,
    state: QuizState,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.questions.len())
            .field("answers", &self.answers)
            .field("state", &self.state)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl QuizSession {
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            state: QuizState::InProgress { current_index: 0 },
            on_complete: None,
        }
    }

    /// Register the callback fired when the quiz completes.
    pub fn with_completion_callback(mut self, callback: impl FnMut(u8) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, QuizState::Completed { .. })
    }

    pub fn score(&self) -> Option<u8> {
        match self.state {
            QuizState::Completed { score_percent } => Some(score_percent),
            QuizState::InProgress { .. } => None,
        }
    }

    /// Whether a completed score reaches `pass_mark`. `None` while in progress.
    pub fn passed(&self, pass_mark: u8) -> Option<bool> {
        self.score().map(|s| s >= pass_mark)
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            QuizState::InProgress { current_index } => Some(current_index),
            QuizState::Completed { .. } => None,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// True when the next successful `advance` completes the quiz.
    pub fn is_on_last_question(&self) -> bool {
        self.current_index()
            .is_some_and(|i| i + 1 == self.questions.len())
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Record (or overwrite) the answer for any question of the quiz.
    /// Does not move the cursor.
    pub fn select_answer(&mut self, question_id: &str, option: &str) -> Result<()> {
        self.ensure_in_progress()?;

        let question = self
            .questions
            .find(question_id)
            .ok_or_else(|| CoursemapError::QuestionNotFound(question_id.to_string()))?;

        if !question.has_option(option) {
            warn!(question = %question_id, option, "answer is not one of the offered options");
            return Err(CoursemapError::InvalidAnswer {
                question: question_id.to_string(),
                option: option.to_string(),
            });
        }

        debug!(question = %question_id, option, "answer recorded");
        self.answers
            .insert(question_id.to_string(), option.to_string());
        Ok(())
    }

    /// Move to the next question, or complete the quiz on the last one.
    pub fn advance(&mut self) -> Result<QuizState> {
        let current_index = self.ensure_in_progress()?;

        let question = self.questions.get(current_index).ok_or_else(|| {
            CoursemapError::invalid_transition("quiz", format!("no question at index {current_index}"))
        })?;

        if !self.answers.contains_key(&question.id) {
            return Err(CoursemapError::AnswerRequired(question.id.clone()));
        }

        if current_index + 1 < self.questions.len() {
            self.state = QuizState::InProgress {
                current_index: current_index + 1,
            };
            debug!(current_index = current_index + 1, "quiz advanced");
            return Ok(self.state);
        }

        let score_percent = self.questions.score(&self.answers);
        self.state = QuizState::Completed { score_percent };
        info!(
            score = score_percent,
            answered = self.answers.len(),
            total = self.questions.len(),
            "quiz completed"
        );

        if let Some(callback) = self.on_complete.as_mut() {
            callback(score_percent);
        }

        Ok(self.state)
    }

    /// Go back one question, keeping recorded answers.
    pub fn retreat(&mut self) -> Result<usize> {
        let current_index = self.ensure_in_progress()?;

        if current_index == 0 {
            return Err(CoursemapError::invalid_transition(
                "quiz",
                "already at the first question",
            ));
        }

        let previous = current_index - 1;
        self.state = QuizState::InProgress {
            current_index: previous,
        };
        debug!(current_index = previous, "quiz moved back");
        Ok(previous)
    }

    fn ensure_in_progress(&self) -> Result<usize> {
        match self.state {
            QuizState::InProgress { current_index } => Ok(current_index),
            QuizState::Completed { .. } => Err(CoursemapError::AlreadyComplete),
        }
    }
}
