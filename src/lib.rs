// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod quiz;
pub mod repository;
pub mod roadmap;
pub mod session;
pub mod types;
pub mod view;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::CatalogFile;
use crate::config::loader::load_and_validate;
use crate::quiz::QuizState;
use crate::repository::{load_dashboard, Dashboard, FixtureRepository};
use crate::roadmap::{NodeKind, RoadmapGraph};
use crate::session::{FileRoleStore, GuardDecision, SessionContext};
use crate::types::Role;
use crate::view::{CourseView, ViewEvent};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - catalog loading
/// - the session context (role flag next to the catalog)
/// - the fixture repository
/// - either a dashboard listing or a course view with learner events and
///   an optional quiz run
pub async fn run(args: CliArgs) -> Result<()> {
    let catalog_path = args.catalog.clone();
    let catalog = load_and_validate(&catalog_path)?;

    if args.dry_run {
        print_dry_run(&catalog);
        return Ok(());
    }

    let config = catalog.config.clone();
    let session_path = catalog_root_dir(&catalog_path).join(&config.session_file);
    let mut session = SessionContext::open(FileRoleStore::new(session_path))?;

    if args.logout {
        session.logout()?;
        println!("logged out");
    }
    if let Some(role) = args.role {
        let landing = session.login(role.into())?;
        info!(%landing, "session started");
    }
    if args.logout && args.role.is_none() {
        return Ok(());
    }

    let mut repo = FixtureRepository::new(catalog);
    if args.no_delay {
        repo = repo.with_latency(Duration::ZERO);
    }

    let Some(course_id) = args.course else {
        let Some(role) = session.role() else {
            println!("not logged in; pass --role student or --role professor");
            return Ok(());
        };
        let dashboard = load_dashboard(&repo, role).await?;
        print_dashboard(&dashboard);
        return Ok(());
    };

    match session.guard(Role::Student) {
        GuardDecision::Allow => {}
        decision => bail!(
            "course roadmaps are only available to students (redirect to {})",
            decision.redirect_path().unwrap_or_default()
        ),
    }

    let pass_mark = config.pass_mark;
    let mut view = CourseView::open(&repo, &course_id)
        .await?
        .with_quiz_callback(move |score| {
            let verdict = if score >= pass_mark {
                "passed"
            } else {
                "below the pass mark"
            };
            println!("Assessment complete! Your score: {score}% ({verdict})");
        });

    for event in args.progress {
        view.step(ViewEvent::Progress(event))?;
    }
    for event in args.complete {
        view.step(ViewEvent::Complete(event))?;
    }

    if !args.answers.is_empty() {
        let score = take_quiz(&mut view, &args.answers)?;
        debug!(score, "quiz finished; showing roadmap");
        if !args.no_delay {
            tokio::time::sleep(config.roadmap_redirect()).await;
        }
    }

    print_roadmap(view.course_id(), view.title(), view.roadmap());
    Ok(())
}

/// Record every answer, then advance until the quiz completes.
///
/// Fails with `AnswerRequired` if a question was left unanswered.
pub fn take_quiz(view: &mut CourseView, answers: &[(String, String)]) -> crate::errors::Result<u8> {
    for (question_id, option) in answers {
        view.step(ViewEvent::SelectAnswer {
            question_id: question_id.clone(),
            option: option.clone(),
        })?;
    }

    loop {
        let step = view.step(ViewEvent::Advance)?;
        if let Some(QuizState::Completed { score_percent }) = step.quiz {
            return Ok(score_percent);
        }
    }
}

/// Directory the session file is resolved against.
///
/// - If the catalog path has a non-empty parent (e.g. "fixtures/Coursemap.toml"),
///   we use that directory.
/// - If it's just a bare filename, we fall back to the current working
///   directory "."
fn catalog_root_dir(catalog_path: &Path) -> PathBuf {
    match catalog_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    match dashboard {
        Dashboard::Student(courses) => {
            println!("Student dashboard ({} courses):", courses.len());
            for c in courses {
                let activity = if c.has_activity { "  [new activity]" } else { "" };
                println!(
                    "  {:<8} {:<32} {:>3}%  next deadline: {}{}",
                    c.code, c.title, c.progress, c.next_deadline, activity
                );
            }
        }
        Dashboard::Professor(courses) => {
            println!("Professor dashboard ({} courses):", courses.len());
            for c in courses {
                println!(
                    "  {:<8} {:<32} students: {}/{} active  average: {}%",
                    c.code, c.title, c.active_students, c.total_students, c.average_score
                );
            }
        }
    }
}

fn print_roadmap(course_id: &str, title: &str, graph: &RoadmapGraph) {
    println!("{}: {} learning roadmap", course_id.to_uppercase(), title);
    for node in graph.topological_order() {
        let detail = match &node.kind {
            NodeKind::Topic {
                progress_percent,
                estimated_hours,
                ..
            } => format!("{progress_percent}% of ~{estimated_hours}h"),
            NodeKind::Assessment { score_percent } => match score_percent {
                Some(score) => format!("score {score}%"),
                None => String::new(),
            },
            NodeKind::Milestone => String::new(),
        };
        println!(
            "  [{:<11}] {:<12} {:<10} {} {}",
            node.status,
            node.id,
            node.kind.label(),
            node.title,
            detail
        );
    }
}

/// Dry-run output: config, dashboards and every roadmap edge.
fn print_dry_run(catalog: &CatalogFile) {
    println!("coursemap dry-run");
    println!(
        "  config.simulated_latency_ms = {}",
        catalog.config.simulated_latency_ms
    );
    println!(
        "  config.roadmap_redirect_ms = {}",
        catalog.config.roadmap_redirect_ms
    );
    println!("  config.pass_mark = {}", catalog.config.pass_mark);
    println!("  config.session_file = {}", catalog.config.session_file);
    println!();

    println!("student courses: {}", catalog.student_courses.len());
    println!("professor courses: {}", catalog.professor_courses.len());
    println!();

    println!("courses ({}):", catalog.courses.len());
    for (id, course) in catalog.courses.iter() {
        println!("  - {id}: {}", course.title);
        println!(
            "      nodes: {}  edges: {}",
            course.roadmap.len(),
            course.roadmap.edges().len()
        );
        for edge in course.roadmap.edges() {
            println!("      {} -> {}", edge.source, edge.target);
        }
        if let Some(ref quiz) = course.quiz {
            println!(
                "      quiz: {} questions, total weight {}",
                quiz.questions.len(),
                quiz.questions.total_weight()
            );
            if let Some(ref node) = quiz.assessment_node {
                println!("      quiz completes: {node}");
            }
        }
    }

    debug!("dry-run complete (nothing opened)");
}
