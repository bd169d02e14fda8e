// tests/status_engine.rs

mod common;
use crate::common::builders::{NodeBuilder, RoadmapBuilder};
use crate::common::{chain_abc, diamond, init_tracing, status};

use std::error::Error;

use coursemap::errors::CoursemapError;
use coursemap::roadmap::{apply_completion, CompletionEvent, ProgressEvent, StatusEngine};
use coursemap::types::NodeStatus;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn chain_only_unlocks_the_next_node() -> TestResult {
    init_tracing();
    let mut engine = StatusEngine::new(chain_abc())?;

    let step = engine.step_completion(&CompletionEvent::finished("A"))?;

    assert_eq!(step.completed.as_deref(), Some("A"));
    assert_eq!(step.newly_available, vec!["B".to_string()]);
    assert!(!step.course_completed);

    let graph = engine.graph();
    assert_eq!(status(graph, "A"), NodeStatus::Completed);
    assert_eq!(status(graph, "B"), NodeStatus::Available);
    assert_eq!(status(graph, "C"), NodeStatus::Locked);
    assert_eq!(graph.node("A").and_then(|n| n.progress_percent()), Some(100));
    Ok(())
}

#[test]
fn completing_a_locked_node_is_rejected_without_changes() -> TestResult {
    let graph = chain_abc();
    let before = graph.clone();

    let result = apply_completion(&graph, &CompletionEvent::finished("C"));

    match result {
        Err(e @ CoursemapError::InvalidTransition { .. }) => assert!(e.is_recoverable()),
        other => panic!("Expected InvalidTransition, got: {:?}", other),
    }
    assert_eq!(graph.nodes(), before.nodes());

    let mut engine = StatusEngine::new(chain_abc())?;
    assert!(engine.step_completion(&CompletionEvent::finished("B")).is_err());
    assert_eq!(engine.graph().nodes(), before.nodes());
    Ok(())
}

#[test]
fn join_waits_for_every_prerequisite() -> TestResult {
    let mut engine = StatusEngine::new(diamond())?;

    let step = engine.step_completion(&CompletionEvent::finished("root"))?;
    let mut unlocked = step.newly_available.clone();
    unlocked.sort();
    assert_eq!(unlocked, vec!["left".to_string(), "right".to_string()]);

    let step = engine.step_completion(&CompletionEvent::assessment("left", 90))?;
    assert!(step.newly_available.is_empty());
    assert_eq!(engine.status_of("join"), Some(NodeStatus::Locked));
    assert_eq!(
        engine.graph().node("left").and_then(|n| n.score_percent()),
        Some(90)
    );

    let step = engine.step_completion(&CompletionEvent::finished("right"))?;
    assert_eq!(step.newly_available, vec!["join".to_string()]);

    let step = engine.step_completion(&CompletionEvent::finished("join"))?;
    assert!(step.course_completed);
    assert!(engine.is_course_complete());
    Ok(())
}

#[test]
fn recompleting_is_idempotent() -> TestResult {
    let graph = StatusEngine::new(diamond())?.into_graph();
    let event = CompletionEvent::finished("root");

    let once = apply_completion(&graph, &event)?;
    let twice = apply_completion(&once, &event)?;
    assert_eq!(once.nodes(), twice.nodes());

    let scored = apply_completion(&once, &CompletionEvent::assessment("left", 40))?;
    let rescored = apply_completion(&scored, &CompletionEvent::assessment("left", 75))?;
    assert_eq!(status(&rescored, "left"), NodeStatus::Completed);
    assert_eq!(rescored.node("left").and_then(|n| n.score_percent()), Some(75));
    Ok(())
}

#[test]
fn locked_roots_are_unlocked_on_load() -> TestResult {
    let graph = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A"))
        .node(NodeBuilder::milestone("M"))
        .build();

    let engine = StatusEngine::new(graph)?;

    assert_eq!(engine.status_of("A"), Some(NodeStatus::Available));
    assert_eq!(engine.status_of("M"), Some(NodeStatus::Available));
    Ok(())
}

#[test]
fn available_node_with_pending_prerequisite_is_rejected_on_load() {
    let graph = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::InProgress).progress(60))
        .node(NodeBuilder::assessment("quiz").status(NodeStatus::Available))
        .edge("A", "quiz")
        .build();

    match StatusEngine::new(graph) {
        Err(CoursemapError::Validation(msg)) => assert!(msg.contains("quiz"), "message: {msg}"),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn result_must_match_node_kind() -> TestResult {
    let mut engine = StatusEngine::new(diamond())?;
    engine.step_completion(&CompletionEvent::finished("root"))?;

    let topic_with_score = engine.step_completion(&CompletionEvent::assessment("right", 50));
    assert!(matches!(
        topic_with_score,
        Err(CoursemapError::InvalidTransition { .. })
    ));

    let assessment_without_score = engine.step_completion(&CompletionEvent::finished("left"));
    assert!(matches!(
        assessment_without_score,
        Err(CoursemapError::InvalidTransition { .. })
    ));

    let too_high = engine.step_completion(&CompletionEvent::assessment("left", 101));
    assert!(matches!(too_high, Err(CoursemapError::Validation(_))));

    let unknown = engine.step_completion(&CompletionEvent::finished("ghost"));
    assert!(matches!(unknown, Err(CoursemapError::NodeNotFound(_))));

    assert_eq!(engine.status_of("left"), Some(NodeStatus::Available));
    assert_eq!(engine.status_of("right"), Some(NodeStatus::Available));
    Ok(())
}

#[test]
fn progress_is_monotonic_and_completes_at_100() -> TestResult {
    let mut engine = StatusEngine::new(chain_abc())?;

    let step = engine.step_progress(&ProgressEvent::new("A", 30))?;
    assert_eq!(step.progressed.as_deref(), Some("A"));
    assert_eq!(engine.status_of("A"), Some(NodeStatus::InProgress));

    engine.step_progress(&ProgressEvent::new("A", 10))?;
    assert_eq!(
        engine.graph().node("A").and_then(|n| n.progress_percent()),
        Some(30)
    );

    let step = engine.step_progress(&ProgressEvent::new("A", 100))?;
    assert_eq!(step.completed.as_deref(), Some("A"));
    assert_eq!(step.newly_available, vec!["B".to_string()]);
    assert_eq!(engine.status_of("A"), Some(NodeStatus::Completed));

    let step = engine.step_progress(&ProgressEvent::new("A", 50))?;
    assert_eq!(step, coursemap::roadmap::StatusStep::unchanged());
    assert_eq!(
        engine.graph().node("A").and_then(|n| n.progress_percent()),
        Some(100)
    );
    Ok(())
}

#[test]
fn progress_is_rejected_on_locked_and_non_topic_nodes() -> TestResult {
    let mut engine = StatusEngine::new(diamond())?;

    assert!(matches!(
        engine.step_progress(&ProgressEvent::new("right", 10)),
        Err(CoursemapError::InvalidTransition { .. })
    ));

    engine.step_completion(&CompletionEvent::finished("root"))?;
    assert!(matches!(
        engine.step_progress(&ProgressEvent::new("left", 10)),
        Err(CoursemapError::InvalidTransition { .. })
    ));
    assert!(matches!(
        engine.step_progress(&ProgressEvent::new("right", 120)),
        Err(CoursemapError::Validation(_))
    ));
    Ok(())
}

#[test]
fn actionable_follows_status() -> TestResult {
    let engine = StatusEngine::new(chain_abc())?;
    assert!(engine.is_actionable("A"));
    assert!(!engine.is_actionable("B"));
    assert!(!engine.is_actionable("ghost"));
    Ok(())
}

#[test]
fn pure_completion_treats_locked_roots_as_ready() -> TestResult {
    // Built directly, without a status engine: both nodes start locked.
    let graph = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A"))
        .node(NodeBuilder::topic("B"))
        .edge("A", "B")
        .build();
    assert_eq!(status(&graph, "A"), NodeStatus::Locked);

    let next = apply_completion(&graph, &CompletionEvent::finished("A"))?;

    assert_eq!(status(&next, "A"), NodeStatus::Completed);
    assert_eq!(status(&next, "B"), NodeStatus::Available);
    assert_eq!(status(&graph, "A"), NodeStatus::Locked);

    let rejected = apply_completion(&graph, &CompletionEvent::finished("B"));
    assert!(matches!(
        rejected,
        Err(CoursemapError::InvalidTransition { .. })
    ));
    Ok(())
}

#[test]
fn pure_completion_rejects_ungated_graphs() {
    let graph = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::Available))
        .node(NodeBuilder::milestone("M").status(NodeStatus::Available))
        .edge("A", "M")
        .build();

    match apply_completion(&graph, &CompletionEvent::finished("M")) {
        Err(CoursemapError::Validation(msg)) => assert!(msg.contains("'M'"), "message: {msg}"),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}
