// src/repository/mod.rs

//! Course data access.
//!
//! Views never read the catalog directly; they go through a
//! [`CourseRepository`]. This keeps the view logic independent of where the
//! data comes from and of any particular async runtime.
//!
//! - [`FixtureRepository`] serves the TOML catalog and simulates network
//!   latency with `tokio::time::sleep`.
//! - Tests can provide their own implementation that answers immediately
//!   and records what was fetched.

pub mod fixture;

use std::future::Future;
use std::pin::Pin;

use crate::config::{CourseFixture, ProfessorCourseSummary, StudentCourseSummary};
use crate::errors::Result;
use crate::types::Role;

pub use fixture::FixtureRepository;

/// Boxed future returned by repository methods.
pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Capability for fetching course data.
pub trait CourseRepository: Send + Sync {
    /// Cards for the student dashboard.
    fn student_courses(&self) -> RepoFuture<'_, Vec<StudentCourseSummary>>;

    /// Cards for the professor dashboard.
    fn professor_courses(&self) -> RepoFuture<'_, Vec<ProfessorCourseSummary>>;

    /// Roadmap and quiz of one course.
    ///
    /// Fails with `CourseNotFound` for unknown ids.
    fn course<'a>(&'a self, course_id: &'a str) -> RepoFuture<'a, CourseFixture>;
}

/// Dashboard listing for a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dashboard {
    Student(Vec<StudentCourseSummary>),
    Professor(Vec<ProfessorCourseSummary>),
}

impl Dashboard {
    pub fn len(&self) -> usize {
        match self {
            Dashboard::Student(courses) => courses.len(),
            Dashboard::Professor(courses) => courses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetch the dashboard cards that `role` sees.
pub async fn load_dashboard<R>(repo: &R, role: Role) -> Result<Dashboard>
where
    R: CourseRepository + ?Sized,
{
    match role {
        Role::Student => Ok(Dashboard::Student(repo.student_courses().await?)),
        Role::Professor => Ok(Dashboard::Professor(repo.professor_courses().await?)),
    }
}
