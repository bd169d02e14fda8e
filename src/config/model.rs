// src/config/model.rs

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::quiz::QuestionSet;
use crate::roadmap::{Position, Resource, RoadmapGraph};
use crate::types::{CourseId, NodeId, NodeStatus, QuestionType};

/// Course catalog as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// simulated_latency_ms = 1000
/// pass_mark = 70
///
/// [[student_course]]
/// id = "cs101"
/// title = "Introduction to Programming"
/// code = "CS101"
/// progress = 65
/// next_deadline = "Oct 25, 2023"
///
/// [course.cs101]
/// title = "Introduction to Programming"
///
/// [[course.cs101.node]]
/// id = "start"
/// kind = "topic"
/// position = { x = 250.0, y = 0.0 }
///
/// [course.cs101.node.data]
/// title = "Course Introduction"
/// status = "available"
///
/// [[course.cs101.edge]]
/// id = "e1-2"
/// source = "start"
/// target = "assessment1"
/// ```
///
/// Use `CatalogFile::try_from` (or [`crate::config::load_and_validate`]) to get
/// a validated [`CatalogFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalogFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Student dashboard cards from `[[student_course]]`.
    #[serde(default)]
    pub student_course: Vec<StudentCourseSummary>,

    /// Professor dashboard cards from `[[professor_course]]`.
    #[serde(default)]
    pub professor_course: Vec<ProfessorCourseSummary>,

    /// Course fixtures from `[course.<id>]`, keyed by course id.
    #[serde(default)]
    pub course: BTreeMap<CourseId, RawCourse>,
}

/// Validated course catalog.
///
/// Only constructed through `TryFrom<RawCatalogFile>`.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub config: ConfigSection,
    pub student_courses: Vec<StudentCourseSummary>,
    pub professor_courses: Vec<ProfessorCourseSummary>,
    pub courses: BTreeMap<CourseId, CourseFixture>,
}

impl CatalogFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        student_courses: Vec<StudentCourseSummary>,
        professor_courses: Vec<ProfessorCourseSummary>,
        courses: BTreeMap<CourseId, CourseFixture>,
    ) -> Self {
        Self {
            config,
            student_courses,
            professor_courses,
            courses,
        }
    }

    pub fn course(&self, id: &str) -> Option<&CourseFixture> {
        self.courses.get(id)
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Artificial delay applied by the fixture repository to every fetch.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Pause between quiz completion and showing the roadmap.
    #[serde(default = "default_roadmap_redirect_ms")]
    pub roadmap_redirect_ms: u64,

    /// Score at or above which a quiz counts as passed.
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u8,

    /// Where the logged-in role flag is persisted.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_simulated_latency_ms() -> u64 {
    1000
}

fn default_roadmap_redirect_ms() -> u64 {
    3000
}

fn default_pass_mark() -> u8 {
    crate::quiz::DEFAULT_PASS_MARK
}

fn default_session_file() -> String {
    ".coursemap/session".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_simulated_latency_ms(),
            roadmap_redirect_ms: default_roadmap_redirect_ms(),
            pass_mark: default_pass_mark(),
            session_file: default_session_file(),
        }
    }
}

impl ConfigSection {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn roadmap_redirect(&self) -> Duration {
        Duration::from_millis(self.roadmap_redirect_ms)
    }
}

/// Card on the student dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentCourseSummary {
    pub id: CourseId,
    pub title: String,
    pub code: String,
    /// Overall course progress, 0..=100.
    pub progress: u8,
    pub next_deadline: String,
    #[serde(default)]
    pub has_activity: bool,
}

/// Card on the professor dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfessorCourseSummary {
    pub id: CourseId,
    pub title: String,
    pub code: String,
    pub total_students: u32,
    pub active_students: u32,
    /// Class average, 0..=100.
    pub average_score: u8,
}

/// `[course.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCourse {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub node: Vec<RawNodeRecord>,

    #[serde(default)]
    pub edge: Vec<RawEdgeRecord>,

    #[serde(default)]
    pub quiz: Option<RawQuiz>,
}

/// Node kind tag as written in the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawNodeKind {
    Topic,
    Assessment,
    Milestone,
}

/// `[[course.<id>.node]]` record: the shape the roadmap renderer consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNodeRecord {
    pub id: NodeId,
    pub kind: RawNodeKind,
    #[serde(default)]
    pub position: Position,
    pub data: RawNodeData,
}

/// `[course.<id>.node.data]` table. Kind-specific keys are optional here and
/// checked against `kind` during validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNodeData {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: NodeStatus,

    /// Topic only; defaults to 0.
    #[serde(default)]
    pub progress: Option<u8>,

    /// Topic only; defaults to 0.
    #[serde(default)]
    pub estimated_hours: Option<f32>,

    /// Topic only.
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Assessment only; required when completed.
    #[serde(default)]
    pub score: Option<u8>,
}

/// `[[course.<id>.edge]]` record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdgeRecord {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,

    #[serde(default)]
    pub animated: bool,

    #[serde(default)]
    pub stroke: Option<String>,
}

/// `[course.<id>.quiz]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuiz {
    /// Assessment node completed with the quiz score.
    #[serde(default)]
    pub assessment_node: Option<NodeId>,

    #[serde(default)]
    pub question: Vec<RawQuestion>,
}

/// `[[course.<id>.quiz.question]]` record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub id: String,
    pub topic: String,
    pub difficulty: f32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub content: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// A validated course: its roadmap and optional placement quiz.
#[derive(Debug, Clone)]
pub struct CourseFixture {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub roadmap: RoadmapGraph,
    pub quiz: Option<CourseQuiz>,
}

/// A validated quiz and the roadmap node it feeds.
#[derive(Debug, Clone)]
pub struct CourseQuiz {
    pub assessment_node: Option<NodeId>,
    pub questions: QuestionSet,
}
