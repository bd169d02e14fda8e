// src/view/course.rs

use tracing::{debug, warn};

use crate::config::CourseFixture;
use crate::errors::{CoursemapError, Result};
use crate::quiz::{QuizSession, QuizState};
use crate::repository::CourseRepository;
use crate::roadmap::{CompletionEvent, RoadmapGraph, StatusEngine};
use crate::types::{CourseId, NodeId};
use crate::view::{ViewEvent, ViewStep};

/// State of one course view.
#[derive(Debug)]
pub struct CourseView {
    course_id: CourseId,
    title: String,
    engine: StatusEngine,
    quiz: Option<QuizSession>,
    /// Assessment node completed with the quiz score.
    quiz_node: Option<NodeId>,
}

impl CourseView {
    /// Fetch a course from the repository and open a view on it.
    pub async fn open<R>(repo: &R, course_id: &str) -> Result<Self>
    where
        R: CourseRepository + ?Sized,
    {
        let fixture = repo.course(course_id).await?;
        Self::from_fixture(fixture)
    }

    pub fn from_fixture(fixture: CourseFixture) -> Result<Self> {
        let engine = StatusEngine::new(fixture.roadmap)?;

        let (quiz, quiz_node) = match fixture.quiz {
            Some(q) => {
                if let Some(ref node_id) = q.assessment_node {
                    match engine.graph().node(node_id) {
                        Some(node) if node.is_assessment() => {}
                        Some(_) => {
                            return Err(CoursemapError::Validation(format!(
                                "quiz assessment node '{node_id}' is not an assessment"
                            )));
                        }
                        None => return Err(CoursemapError::NodeNotFound(node_id.clone())),
                    }
                }
                (Some(QuizSession::new(q.questions)), q.assessment_node)
            }
            None => (None, None),
        };

        debug!(course = %fixture.id, has_quiz = quiz.is_some(), "course view opened");

        Ok(Self {
            course_id: fixture.id,
            title: fixture.title,
            engine,
            quiz,
            quiz_node,
        })
    }

    /// Register a callback fired with the score when the quiz completes.
    pub fn with_quiz_callback(mut self, callback: impl FnMut(u8) + Send + 'static) -> Self {
        self.quiz = self
            .quiz
            .map(|session| session.with_completion_callback(callback));
        self
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn roadmap(&self) -> &RoadmapGraph {
        self.engine.graph()
    }

    pub fn engine(&self) -> &StatusEngine {
        &self.engine
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn quiz_node(&self) -> Option<&str> {
        self.quiz_node.as_deref()
    }

    /// Apply one learner interaction. Rejected events leave the view unchanged.
    pub fn step(&mut self, event: ViewEvent) -> Result<ViewStep> {
        match event {
            ViewEvent::SelectAnswer {
                question_id,
                option,
            } => {
                let quiz = self.quiz_mut()?;
                quiz.select_answer(&question_id, &option)?;
                Ok(ViewStep {
                    quiz: Some(quiz.state()),
                    roadmap: None,
                })
            }
            ViewEvent::Advance => self.advance_quiz(),
            ViewEvent::Retreat => {
                let quiz = self.quiz_mut()?;
                quiz.retreat()?;
                Ok(ViewStep {
                    quiz: Some(quiz.state()),
                    roadmap: None,
                })
            }
            ViewEvent::Progress(event) => Ok(ViewStep {
                quiz: None,
                roadmap: Some(self.engine.step_progress(&event)?),
            }),
            ViewEvent::Complete(event) => Ok(ViewStep {
                quiz: None,
                roadmap: Some(self.engine.step_completion(&event)?),
            }),
        }
    }

    fn advance_quiz(&mut self) -> Result<ViewStep> {
        let quiz = self.quiz.as_mut().ok_or_else(|| {
            CoursemapError::invalid_transition(&self.course_id, "course has no quiz")
        })?;

        // Finishing the quiz must not leave a score the roadmap refuses.
        let would_complete = quiz.is_on_last_question()
            && quiz
                .current_question()
                .is_some_and(|q| quiz.answer_for(&q.id).is_some());
        if would_complete {
            if let Some(ref node_id) = self.quiz_node {
                if !self.engine.is_actionable(node_id) {
                    warn!(node = %node_id, "quiz assessment is locked; refusing to finish quiz");
                    return Err(CoursemapError::invalid_transition(
                        node_id,
                        "quiz assessment is locked",
                    ));
                }
            }
        }

        let state = quiz.advance()?;

        let roadmap = match (state, self.quiz_node.as_ref()) {
            (QuizState::Completed { score_percent }, Some(node_id)) => Some(
                self.engine
                    .step_completion(&CompletionEvent::assessment(node_id.clone(), score_percent))?,
            ),
            _ => None,
        };

        Ok(ViewStep {
            quiz: Some(state),
            roadmap,
        })
    }

    fn quiz_mut(&mut self) -> Result<&mut QuizSession> {
        let course_id = &self.course_id;
        self.quiz
            .as_mut()
            .ok_or_else(|| CoursemapError::invalid_transition(course_id, "course has no quiz"))
    }
}
