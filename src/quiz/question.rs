// src/quiz/question.rs

use std::collections::{HashMap, HashSet};

use crate::errors::{CoursemapError, Result};
use crate::types::QuestionType;

/// One question of an assessment quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub id: String,
    /// Topic label shown above the question.
    pub topic: String,
    /// 0.0 (easy) to 1.0 (hard).
    pub difficulty: f32,
    pub question_type: QuestionType,
    pub content: String,
    pub options: Vec<String>,
    /// Always one of `options`.
    pub correct_answer: String,
    /// Contribution to the score; positive.
    pub weight: f64,
}

impl QuizQuestion {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    fn validate(&self) -> Result<()> {
        let fail = |reason: String| {
            Err(CoursemapError::Validation(format!(
                "question '{}': {}",
                self.id, reason
            )))
        };

        if self.id.trim().is_empty() {
            return Err(CoursemapError::Validation(
                "question id must not be empty".to_string(),
            ));
        }
        if self.options.is_empty() {
            return fail("must offer at least one option".to_string());
        }
        if !self.has_option(&self.correct_answer) {
            return fail(format!(
                "correct answer '{}' is not one of its options",
                self.correct_answer
            ));
        }
        if self.question_type == QuestionType::TrueFalse && self.options.len() != 2 {
            return fail(format!(
                "true/false question must have exactly 2 options (got {})",
                self.options.len()
            ));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return fail(format!("weight must be positive (got {})", self.weight));
        }
        if !(0.0..=1.0).contains(&self.difficulty) {
            return fail(format!(
                "difficulty must be within 0.0..=1.0 (got {})",
                self.difficulty
            ));
        }
        Ok(())
    }
}

/// Validated, ordered set of quiz questions with a positive total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    questions: Vec<QuizQuestion>,
    total_weight: f64,
}

impl QuestionSet {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(CoursemapError::Validation(
                "a quiz needs at least one question".to_string(),
            ));
        }

        let mut ids = HashSet::with_capacity(questions.len());
        for q in &questions {
            q.validate()?;
            if !ids.insert(q.id.as_str()) {
                return Err(CoursemapError::Validation(format!(
                    "duplicate question id '{}'",
                    q.id
                )));
            }
        }

        let total_weight: f64 = questions.iter().map(|q| q.weight).sum();
        if !(total_weight.is_finite() && total_weight > 0.0) {
            return Err(CoursemapError::Validation(format!(
                "total question weight must be positive (got {total_weight})"
            )));
        }

        Ok(Self {
            questions,
            total_weight,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.questions.iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Weighted percentage of correct answers, rounded to the nearest integer.
    ///
    /// Unanswered questions count as wrong.
    pub fn score(&self, answers: &HashMap<String, String>) -> u8 {
        let earned: f64 = self
            .questions
            .iter()
            .filter(|q| answers.get(&q.id).is_some_and(|a| q.is_correct(a)))
            .map(|q| q.weight)
            .sum();

        let percent = (earned / self.total_weight * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }
}
