// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_catalog_path;
use crate::roadmap::{CompletionEvent, ProgressEvent};
use crate::types::Role;

/// Command-line arguments for `coursemap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coursemap",
    version,
    about = "Course roadmaps, prerequisite gating and placement quizzes.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the course catalog (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_catalog_path())]
    pub catalog: PathBuf,

    /// Log in with this role before doing anything else.
    #[arg(long, value_enum, value_name = "ROLE")]
    pub role: Option<RoleArg>,

    /// Clear the stored role flag.
    #[arg(long)]
    pub logout: bool,

    /// Open the roadmap of this course. Without it, the dashboard of the
    /// logged-in role is listed.
    #[arg(long, value_name = "ID")]
    pub course: Option<String>,

    /// Report a finished node; assessments take a score (`quiz1=85`).
    #[arg(long = "complete", value_name = "NODE[=SCORE]", value_parser = parse_completion)]
    pub complete: Vec<CompletionEvent>,

    /// Report partial progress on a topic (`topic1=60`).
    #[arg(long = "progress", value_name = "NODE=PERCENT", value_parser = parse_progress)]
    pub progress: Vec<ProgressEvent>,

    /// Answer a quiz question (`q2=O(log n)`); takes the course quiz when given.
    #[arg(long = "answer", value_name = "QUESTION=OPTION", value_parser = parse_answer)]
    pub answers: Vec<(String, String)>,

    /// Skip the simulated fetch latency and the post-quiz pause.
    #[arg(long)]
    pub no_delay: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COURSEMAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the catalog and print it, without opening a session.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Student,
    Professor,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Student => Role::Student,
            RoleArg::Professor => Role::Professor,
        }
    }
}

/// `NODE` or `NODE=SCORE`.
pub fn parse_completion(s: &str) -> Result<CompletionEvent, String> {
    match s.split_once('=') {
        None => non_empty(s, "node").map(CompletionEvent::finished),
        Some((node, score)) => {
            let node = non_empty(node, "node")?;
            let score = parse_percent(score)?;
            Ok(CompletionEvent::assessment(node, score))
        }
    }
}

/// `NODE=PERCENT`.
pub fn parse_progress(s: &str) -> Result<ProgressEvent, String> {
    let (node, percent) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NODE=PERCENT, got '{s}'"))?;
    Ok(ProgressEvent::new(non_empty(node, "node")?, parse_percent(percent)?))
}

/// `QUESTION=OPTION`; the option may itself contain `=`.
pub fn parse_answer(s: &str) -> Result<(String, String), String> {
    let (question, option) = s
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=OPTION, got '{s}'"))?;
    Ok((non_empty(question, "question")?, option.to_string()))
}

fn non_empty(s: &str, what: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        Err(format!("{what} id must not be empty"))
    } else {
        Ok(s.to_string())
    }
}

fn parse_percent(s: &str) -> Result<u8, String> {
    match s.trim().parse::<u8>() {
        Ok(v) if v <= 100 => Ok(v),
        _ => Err(format!("expected a percentage within 0..=100, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
