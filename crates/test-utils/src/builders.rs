#![allow(dead_code)]

use coursemap::config::{CourseFixture, CourseQuiz};
use coursemap::quiz::{QuestionSet, QuizQuestion};
use coursemap::roadmap::{NodeKind, Position, Resource, RoadmapEdge, RoadmapGraph, RoadmapNode};
use coursemap::types::{NodeStatus, QuestionType, ResourceKind};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Topic,
    Assessment,
    Milestone,
}

/// Builder for a single `RoadmapNode`.
///
/// Unset kind fields follow the node status: a completed topic gets
/// progress 100, a completed assessment gets score 100.
pub struct NodeBuilder {
    id: String,
    kind: Kind,
    status: NodeStatus,
    progress: Option<u8>,
    hours: f32,
    resources: Vec<Resource>,
    score: Option<u8>,
}

impl NodeBuilder {
    fn new(id: &str, kind: Kind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            status: NodeStatus::Locked,
            progress: None,
            hours: 1.0,
            resources: Vec::new(),
            score: None,
        }
    }

    pub fn topic(id: &str) -> Self {
        Self::new(id, Kind::Topic)
    }

    pub fn assessment(id: &str) -> Self {
        Self::new(id, Kind::Assessment)
    }

    pub fn milestone(id: &str) -> Self {
        Self::new(id, Kind::Milestone)
    }

    pub fn status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn progress(mut self, percent: u8) -> Self {
        self.progress = Some(percent);
        self
    }

    pub fn score(mut self, percent: u8) -> Self {
        self.score = Some(percent);
        self
    }

    pub fn hours(mut self, hours: f32) -> Self {
        self.hours = hours;
        self
    }

    pub fn resource(mut self, id: &str, kind: ResourceKind, title: &str) -> Self {
        self.resources.push(Resource {
            id: id.to_string(),
            kind,
            title: title.to_string(),
        });
        self
    }

    pub fn build(self) -> RoadmapNode {
        let completed = self.status == NodeStatus::Completed;
        let kind = match self.kind {
            Kind::Topic => NodeKind::Topic {
                progress_percent: self
                    .progress
                    .unwrap_or(if completed { 100 } else { 0 }),
                estimated_hours: self.hours,
                resources: self.resources,
            },
            Kind::Assessment => NodeKind::Assessment {
                score_percent: self.score.or(if completed { Some(100) } else { None }),
            },
            Kind::Milestone => NodeKind::Milestone,
        };

        RoadmapNode {
            title: format!("Node {}", self.id),
            description: String::new(),
            id: self.id,
            status: self.status,
            position: Position::default(),
            kind,
        }
    }
}

/// Builder for `RoadmapGraph` to simplify test setup.
#[derive(Default)]
pub struct RoadmapBuilder {
    nodes: Vec<RoadmapNode>,
    edges: Vec<RoadmapEdge>,
}

impl RoadmapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: NodeBuilder) -> Self {
        self.nodes.push(node.build());
        self
    }

    pub fn raw_node(mut self, node: RoadmapNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Prerequisite edge `source -> target` with id `"source->target"`.
    pub fn edge(mut self, source: &str, target: &str) -> Self {
        self.edges.push(RoadmapEdge::new(
            format!("{source}->{target}"),
            source,
            target,
        ));
        self
    }

    pub fn raw_edge(mut self, edge: RoadmapEdge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn try_build(self) -> coursemap::errors::Result<RoadmapGraph> {
        RoadmapGraph::new(self.nodes, self.edges)
    }

    pub fn build(self) -> RoadmapGraph {
        self.try_build()
            .expect("Failed to build valid roadmap from builder")
    }
}

/// Builder for `QuizQuestion`.
pub struct QuestionBuilder {
    question: QuizQuestion,
}

impl QuestionBuilder {
    /// Multiple-choice question with options `A`..`D`, correct answer `A`.
    pub fn new(id: &str) -> Self {
        Self {
            question: QuizQuestion {
                id: id.to_string(),
                topic: "General".to_string(),
                difficulty: 0.5,
                question_type: QuestionType::MultipleChoice,
                content: format!("Question {id}"),
                options: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
                correct_answer: "A".to_string(),
                weight: 1.0,
            },
        }
    }

    /// True/false question whose correct answer is `True`.
    pub fn true_false(id: &str) -> Self {
        let mut b = Self::new(id);
        b.question.question_type = QuestionType::TrueFalse;
        b.question.options = vec!["True".to_string(), "False".to_string()];
        b.question.correct_answer = "True".to_string();
        b
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.question.options = options.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn correct(mut self, answer: &str) -> Self {
        self.question.correct_answer = answer.to_string();
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.question.weight = weight;
        self
    }

    pub fn difficulty(mut self, difficulty: f32) -> Self {
        self.question.difficulty = difficulty;
        self
    }

    pub fn build(self) -> QuizQuestion {
        self.question
    }
}

/// Question set of default multiple-choice questions with the given weights,
/// ids `q1`, `q2`, ...
pub fn weighted_questions(weights: &[f64]) -> QuestionSet {
    let questions = weights
        .iter()
        .enumerate()
        .map(|(i, w)| QuestionBuilder::new(&format!("q{}", i + 1)).weight(*w).build())
        .collect();
    QuestionSet::new(questions).expect("Failed to build valid question set")
}

/// Builder for `CourseFixture`.
pub struct CourseFixtureBuilder {
    id: String,
    title: String,
    roadmap: RoadmapGraph,
    quiz: Option<CourseQuiz>,
}

impl CourseFixtureBuilder {
    pub fn new(id: &str, roadmap: RoadmapGraph) -> Self {
        Self {
            id: id.to_string(),
            title: id.to_uppercase(),
            roadmap,
            quiz: None,
        }
    }

    pub fn quiz(mut self, questions: QuestionSet, assessment_node: Option<&str>) -> Self {
        self.quiz = Some(CourseQuiz {
            assessment_node: assessment_node.map(str::to_string),
            questions,
        });
        self
    }

    pub fn build(self) -> CourseFixture {
        CourseFixture {
            id: self.id,
            title: self.title,
            description: String::new(),
            roadmap: self.roadmap,
            quiz: self.quiz,
        }
    }
}
