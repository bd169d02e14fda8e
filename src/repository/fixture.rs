// src/repository/fixture.rs

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::{CatalogFile, CourseFixture, ProfessorCourseSummary, StudentCourseSummary};
use crate::errors::CoursemapError;
use crate::repository::{CourseRepository, RepoFuture};

/// Repository backed by a validated catalog file.
///
/// Every fetch waits for the configured latency first, standing in for a
/// network round trip. The delay never fails.
#[derive(Debug, Clone)]
pub struct FixtureRepository {
    catalog: Arc<CatalogFile>,
    latency: Duration,
}

impl FixtureRepository {
    /// Use the latency from the catalog's `[config].simulated_latency_ms`.
    pub fn new(catalog: CatalogFile) -> Self {
        let latency = catalog.config.simulated_latency();
        Self {
            catalog: Arc::new(catalog),
            latency,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn catalog(&self) -> &CatalogFile {
        &self.catalog
    }

    async fn simulate_round_trip(&self, what: &str) {
        debug!(what, latency_ms = self.latency.as_millis() as u64, "simulated fetch");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl CourseRepository for FixtureRepository {
    fn student_courses(&self) -> RepoFuture<'_, Vec<StudentCourseSummary>> {
        Box::pin(async move {
            self.simulate_round_trip("student courses").await;
            Ok(self.catalog.student_courses.clone())
        })
    }

    fn professor_courses(&self) -> RepoFuture<'_, Vec<ProfessorCourseSummary>> {
        Box::pin(async move {
            self.simulate_round_trip("professor courses").await;
            Ok(self.catalog.professor_courses.clone())
        })
    }

    fn course<'a>(&'a self, course_id: &'a str) -> RepoFuture<'a, CourseFixture> {
        Box::pin(async move {
            self.simulate_round_trip("course").await;
            self.catalog
                .course(course_id)
                .cloned()
                .ok_or_else(|| CoursemapError::CourseNotFound(course_id.to_string()))
        })
    }
}
