// tests/course_view.rs

mod common;
use crate::common::builders::{weighted_questions, CourseFixtureBuilder, NodeBuilder, RoadmapBuilder};
use crate::common::fake_repository::FakeRepository;
use crate::common::{chain_abc, init_tracing, with_timeout};

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use coursemap::config::{load_and_validate, CourseFixture, StudentCourseSummary};
use coursemap::errors::CoursemapError;
use coursemap::quiz::QuizState;
use coursemap::repository::{load_dashboard, Dashboard, FixtureRepository};
use coursemap::roadmap::{CompletionEvent, ProgressEvent};
use coursemap::take_quiz;
use coursemap::types::{NodeStatus, Role};
use coursemap::view::{CourseView, ViewEvent};

type TestResult = Result<(), Box<dyn Error>>;

const CS101_CORRECT: [(&str, &str); 5] = [
    ("q1", "let name = 'John';"),
    ("q2", "O(log n)"),
    ("q3", "Dijkstra's Algorithm"),
    ("q4", "True"),
    ("q5", "Services share a centralized database"),
];

fn shipped_repository() -> Result<FixtureRepository, CoursemapError> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Coursemap.toml");
    Ok(FixtureRepository::new(load_and_validate(path)?).with_latency(Duration::ZERO))
}

fn answers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(q, o)| (q.to_string(), o.to_string()))
        .collect()
}

/// `intro` (available topic) -> `exam` (locked assessment), one-question quiz on `exam`.
fn gated_quiz_fixture() -> CourseFixture {
    let roadmap = RoadmapBuilder::new()
        .node(NodeBuilder::topic("intro").status(NodeStatus::Available))
        .node(NodeBuilder::assessment("exam"))
        .node(NodeBuilder::milestone("done"))
        .edge("intro", "exam")
        .edge("exam", "done")
        .build();
    CourseFixtureBuilder::new("gated", roadmap)
        .quiz(weighted_questions(&[1.0]), Some("exam"))
        .build()
}

#[tokio::test]
async fn finishing_the_placement_quiz_unlocks_the_next_topics() -> TestResult {
    init_tracing();
    let repo = shipped_repository()?;

    let scores = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&scores);
    let mut view = CourseView::open(&repo, "cs101")
        .await?
        .with_quiz_callback(move |score| sink.lock().unwrap().push(score));

    assert_eq!(view.quiz_node(), Some("assessment1"));
    assert_eq!(view.engine().status_of("topic1"), Some(NodeStatus::Locked));

    let score = take_quiz(&mut view, &answers(&CS101_CORRECT))?;

    assert_eq!(score, 100);
    assert_eq!(*scores.lock().unwrap(), vec![100]);

    let roadmap = view.roadmap();
    let assessment = roadmap.node("assessment1").ok_or("assessment1 missing")?;
    assert_eq!(assessment.status, NodeStatus::Completed);
    assert_eq!(assessment.score_percent(), Some(100));
    assert_eq!(roadmap.node("topic1").map(|n| n.status), Some(NodeStatus::Available));
    assert_eq!(roadmap.node("topic2").map(|n| n.status), Some(NodeStatus::Available));
    assert_eq!(roadmap.node("milestone1").map(|n| n.status), Some(NodeStatus::Locked));
    Ok(())
}

#[tokio::test]
async fn final_advance_reports_quiz_and_roadmap_changes() -> TestResult {
    let repo = shipped_repository()?;
    let mut view = CourseView::open(&repo, "cs101").await?;

    // Two wrong answers out of five equal weights.
    let mut picks = CS101_CORRECT;
    picks[0].1 = "var 123 = 'number';";
    picks[3].1 = "False";

    for (i, (question_id, option)) in picks.iter().enumerate() {
        view.step(ViewEvent::SelectAnswer {
            question_id: question_id.to_string(),
            option: option.to_string(),
        })?;
        let step = view.step(ViewEvent::Advance)?;

        if i + 1 < picks.len() {
            assert_eq!(step.quiz, Some(QuizState::InProgress { current_index: i + 1 }));
            assert!(step.roadmap.is_none());
        } else {
            assert_eq!(step.quiz, Some(QuizState::Completed { score_percent: 60 }));
            let roadmap = step.roadmap.ok_or("roadmap step missing")?;
            assert_eq!(roadmap.completed.as_deref(), Some("assessment1"));
            let mut unlocked = roadmap.newly_available.clone();
            unlocked.sort();
            assert_eq!(unlocked, vec!["topic1".to_string(), "topic2".to_string()]);
        }
    }

    assert_eq!(view.quiz().and_then(|q| q.passed(70)), Some(false));
    assert!(matches!(
        view.step(ViewEvent::Advance),
        Err(CoursemapError::AlreadyComplete)
    ));
    Ok(())
}

#[tokio::test]
async fn quiz_on_a_locked_assessment_cannot_be_finished() -> TestResult {
    let repo = FakeRepository::new().with_course(gated_quiz_fixture());
    let mut view = CourseView::open(&repo, "gated").await?;

    view.step(ViewEvent::SelectAnswer {
        question_id: "q1".to_string(),
        option: "A".to_string(),
    })?;
    let result = view.step(ViewEvent::Advance);

    assert!(matches!(result, Err(CoursemapError::InvalidTransition { .. })));
    assert_eq!(view.quiz().map(|q| q.state()), Some(QuizState::InProgress { current_index: 0 }));
    assert_eq!(view.engine().status_of("exam"), Some(NodeStatus::Locked));

    // Finish the prerequisite, then the quiz goes through.
    view.step(ViewEvent::Complete(CompletionEvent::finished("intro")))?;
    let step = view.step(ViewEvent::Advance)?;
    assert_eq!(step.quiz, Some(QuizState::Completed { score_percent: 100 }));
    assert_eq!(view.engine().status_of("exam"), Some(NodeStatus::Completed));
    assert_eq!(view.engine().status_of("done"), Some(NodeStatus::Available));
    Ok(())
}

#[tokio::test]
async fn roadmap_events_flow_through_the_view() -> TestResult {
    let repo = FakeRepository::new().with_course(CourseFixtureBuilder::new("abc", chain_abc()).build());
    let mut view = CourseView::open(&repo, "abc").await?;

    let step = view.step(ViewEvent::Progress(ProgressEvent::new("A", 45)))?;
    assert_eq!(step.roadmap.and_then(|s| s.progressed), Some("A".to_string()));
    assert_eq!(view.engine().status_of("A"), Some(NodeStatus::InProgress));

    let rejected = view.step(ViewEvent::Complete(CompletionEvent::finished("C")));
    assert!(matches!(rejected, Err(CoursemapError::InvalidTransition { .. })));

    view.step(ViewEvent::Complete(CompletionEvent::finished("A")))?;
    assert_eq!(view.engine().status_of("B"), Some(NodeStatus::Available));

    // No quiz in this course.
    assert!(view.quiz().is_none());
    assert!(matches!(
        view.step(ViewEvent::Advance),
        Err(CoursemapError::InvalidTransition { .. })
    ));
    assert!(matches!(
        view.step(ViewEvent::Retreat),
        Err(CoursemapError::InvalidTransition { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn unknown_course_is_reported() -> TestResult {
    let repo = FakeRepository::new();
    let result = CourseView::open(&repo, "nope").await;

    assert!(matches!(result, Err(CoursemapError::CourseNotFound(ref id)) if id == "nope"));
    assert_eq!(repo.fetched(), vec!["course:nope".to_string()]);

    let shipped = shipped_repository()?;
    assert!(matches!(
        CourseView::open(&shipped, "phys150").await,
        Err(CoursemapError::CourseNotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn quiz_node_must_be_an_assessment() {
    let fixture = CourseFixtureBuilder::new("abc", chain_abc())
        .quiz(weighted_questions(&[1.0]), Some("B"))
        .build();
    assert!(matches!(
        CourseView::from_fixture(fixture),
        Err(CoursemapError::Validation(_))
    ));

    let fixture = CourseFixtureBuilder::new("abc", chain_abc())
        .quiz(weighted_questions(&[1.0]), Some("ghost"))
        .build();
    assert!(matches!(
        CourseView::from_fixture(fixture),
        Err(CoursemapError::NodeNotFound(_))
    ));
}

#[tokio::test]
async fn dashboards_follow_the_role() -> TestResult {
    let card = StudentCourseSummary {
        id: "cs101".to_string(),
        title: "Introduction to Programming".to_string(),
        code: "CS101".to_string(),
        progress: 65,
        next_deadline: "Oct 25, 2023".to_string(),
        has_activity: true,
    };
    let repo = FakeRepository::new().with_student_course(card.clone());

    let student = load_dashboard(&repo, Role::Student).await?;
    assert_eq!(student, Dashboard::Student(vec![card]));

    let professor = load_dashboard(&repo, Role::Professor).await?;
    assert!(professor.is_empty());

    assert_eq!(
        repo.fetched(),
        vec!["student_courses".to_string(), "professor_courses".to_string()]
    );

    let shipped = shipped_repository()?;
    assert_eq!(load_dashboard(&shipped, Role::Student).await?.len(), 4);
    assert_eq!(load_dashboard(&shipped, Role::Professor).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn fixture_repository_waits_before_answering() -> TestResult {
    let latency = Duration::from_millis(30);
    let repo = shipped_repository()?.with_latency(latency);
    assert_eq!(repo.latency(), latency);

    let started = Instant::now();
    let dashboard = with_timeout(load_dashboard(&repo, Role::Student)).await?;

    assert!(started.elapsed() >= latency);
    assert_eq!(dashboard.len(), 4);
    Ok(())
}

#[tokio::test]
async fn take_quiz_requires_every_answer() -> TestResult {
    let repo = shipped_repository()?;
    let mut view = CourseView::open(&repo, "cs101").await?;

    let result = take_quiz(&mut view, &answers(&CS101_CORRECT[..3]));

    assert!(matches!(result, Err(CoursemapError::AnswerRequired(ref id)) if id == "q4"));
    assert_eq!(view.engine().status_of("assessment1"), Some(NodeStatus::Available));
    Ok(())
}
