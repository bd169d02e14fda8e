// src/config/validate.rs

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::model::{
    CatalogFile, ConfigSection, CourseFixture, CourseQuiz, ProfessorCourseSummary, RawCatalogFile,
    RawCourse, RawEdgeRecord, RawNodeKind, RawNodeRecord, RawQuiz, StudentCourseSummary,
};
use crate::errors::{CoursemapError, Result};
use crate::quiz::{QuestionSet, QuizQuestion};
use crate::roadmap::{NodeKind, RoadmapEdge, RoadmapGraph, RoadmapNode, StatusEngine};
use crate::types::CourseId;

impl TryFrom<RawCatalogFile> for CatalogFile {
    type Error = CoursemapError;

    fn try_from(raw: RawCatalogFile) -> std::result::Result<Self, Self::Error> {
        validate_global_config(&raw.config)?;
        validate_student_courses(&raw.student_course)?;
        validate_professor_courses(&raw.professor_course)?;

        let mut courses = BTreeMap::new();
        for (id, course) in raw.course {
            let fixture = build_course(id.clone(), course)?;
            courses.insert(id, fixture);
        }

        Ok(CatalogFile::new_unchecked(
            raw.config,
            raw.student_course,
            raw.professor_course,
            courses,
        ))
    }
}

fn validate_global_config(cfg: &ConfigSection) -> Result<()> {
    if cfg.pass_mark > 100 {
        return Err(CoursemapError::Validation(format!(
            "[config].pass_mark must be within 0..=100 (got {})",
            cfg.pass_mark
        )));
    }
    if cfg.session_file.trim().is_empty() {
        return Err(CoursemapError::Validation(
            "[config].session_file must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_student_courses(courses: &[StudentCourseSummary]) -> Result<()> {
    ensure_unique_ids("student_course", courses.iter().map(|c| c.id.as_str()))?;
    for c in courses {
        if c.progress > 100 {
            return Err(CoursemapError::Validation(format!(
                "student_course '{}': progress must be within 0..=100 (got {})",
                c.id, c.progress
            )));
        }
    }
    Ok(())
}

fn validate_professor_courses(courses: &[ProfessorCourseSummary]) -> Result<()> {
    ensure_unique_ids("professor_course", courses.iter().map(|c| c.id.as_str()))?;
    for c in courses {
        if c.active_students > c.total_students {
            return Err(CoursemapError::Validation(format!(
                "professor_course '{}': active_students ({}) exceeds total_students ({})",
                c.id, c.active_students, c.total_students
            )));
        }
        if c.average_score > 100 {
            return Err(CoursemapError::Validation(format!(
                "professor_course '{}': average_score must be within 0..=100 (got {})",
                c.id, c.average_score
            )));
        }
    }
    Ok(())
}

fn ensure_unique_ids<'a>(section: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoursemapError::Validation(format!(
                "duplicate id '{id}' in [[{section}]]"
            )));
        }
    }
    Ok(())
}

fn build_course(id: CourseId, raw: RawCourse) -> Result<CourseFixture> {
    if raw.node.is_empty() {
        return Err(CoursemapError::Validation(format!(
            "course '{id}' must contain at least one [[course.{id}.node]]"
        )));
    }

    let nodes = raw
        .node
        .into_iter()
        .map(node_from_record)
        .collect::<Result<Vec<_>>>()
        .map_err(|e| in_course(&id, e))?;
    let edges = raw.edge.into_iter().map(edge_from_record).collect();

    let graph = RoadmapGraph::new(nodes, edges).map_err(|e| in_course(&id, e))?;
    // Reject fixtures whose statuses contradict their prerequisites.
    let roadmap = StatusEngine::new(graph)
        .map_err(|e| in_course(&id, e))?
        .into_graph();

    let quiz = raw
        .quiz
        .map(|q| build_quiz(&id, &roadmap, q))
        .transpose()?;

    debug!(
        course = %id,
        nodes = roadmap.len(),
        edges = roadmap.edges().len(),
        has_quiz = quiz.is_some(),
        "course fixture validated"
    );

    Ok(CourseFixture {
        id,
        title: raw.title,
        description: raw.description,
        roadmap,
        quiz,
    })
}

fn node_from_record(record: RawNodeRecord) -> Result<RoadmapNode> {
    let data = record.data;
    let misplaced = |field: &str| {
        CoursemapError::Validation(format!(
            "node '{}': `{}` is not allowed on a {:?} node",
            record.id, field, record.kind
        ))
    };

    let kind = match record.kind {
        RawNodeKind::Topic => {
            if data.score.is_some() {
                return Err(misplaced("score"));
            }
            NodeKind::Topic {
                progress_percent: data.progress.unwrap_or(0),
                estimated_hours: data.estimated_hours.unwrap_or(0.0),
                resources: data.resources,
            }
        }
        RawNodeKind::Assessment => {
            if data.progress.is_some() {
                return Err(misplaced("progress"));
            }
            if data.estimated_hours.is_some() {
                return Err(misplaced("estimated_hours"));
            }
            NodeKind::Assessment {
                score_percent: data.score,
            }
        }
        RawNodeKind::Milestone => {
            if data.progress.is_some() {
                return Err(misplaced("progress"));
            }
            if data.score.is_some() {
                return Err(misplaced("score"));
            }
            NodeKind::Milestone
        }
    };

    Ok(RoadmapNode {
        id: record.id,
        title: data.title,
        description: data.description,
        status: data.status,
        position: record.position,
        kind,
    })
}

fn edge_from_record(record: RawEdgeRecord) -> RoadmapEdge {
    RoadmapEdge {
        id: record.id,
        source: record.source,
        target: record.target,
        emphasis: record.animated,
        stroke: record.stroke,
    }
}

fn build_quiz(course: &str, roadmap: &RoadmapGraph, raw: RawQuiz) -> Result<CourseQuiz> {
    if let Some(ref node_id) = raw.assessment_node {
        match roadmap.node(node_id) {
            Some(node) if node.is_assessment() => {}
            Some(node) => {
                return Err(CoursemapError::Validation(format!(
                    "course '{}': quiz assessment_node '{}' is a {}, not an assessment",
                    course,
                    node_id,
                    node.kind.label()
                )));
            }
            None => {
                return Err(CoursemapError::Validation(format!(
                    "course '{course}': quiz assessment_node '{node_id}' is not a roadmap node"
                )));
            }
        }
    }

    let questions = raw
        .question
        .into_iter()
        .map(|q| QuizQuestion {
            id: q.id,
            topic: q.topic,
            difficulty: q.difficulty,
            question_type: q.question_type,
            content: q.content,
            options: q.options,
            correct_answer: q.correct_answer,
            weight: q.weight,
        })
        .collect();

    let questions = QuestionSet::new(questions).map_err(|e| in_course(course, e))?;

    Ok(CourseQuiz {
        assessment_node: raw.assessment_node,
        questions,
    })
}

/// Prefix validation messages with the course they came from.
fn in_course(course: &str, err: CoursemapError) -> CoursemapError {
    match err {
        CoursemapError::Validation(msg) => {
            CoursemapError::Validation(format!("course '{course}': {msg}"))
        }
        CoursemapError::Cycle(msg) => CoursemapError::Cycle(format!("course '{course}': {msg}")),
        other => other,
    }
}
