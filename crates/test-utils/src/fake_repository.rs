use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use coursemap::config::{CourseFixture, ProfessorCourseSummary, StudentCourseSummary};
use coursemap::errors::CoursemapError;
use coursemap::repository::{CourseRepository, RepoFuture};
use tracing::debug;

/// A fake repository that:
/// - answers immediately (no timers)
/// - records every fetch as `"student_courses"`, `"professor_courses"` or
///   `"course:<id>"`.
#[derive(Debug, Clone, Default)]
pub struct FakeRepository {
    pub student: Vec<StudentCourseSummary>,
    pub professor: Vec<ProfessorCourseSummary>,
    courses: HashMap<String, CourseFixture>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course(mut self, fixture: CourseFixture) -> Self {
        self.courses.insert(fixture.id.clone(), fixture);
        self
    }

    pub fn with_student_course(mut self, summary: StudentCourseSummary) -> Self {
        self.student.push(summary);
        self
    }

    pub fn with_professor_course(mut self, summary: ProfessorCourseSummary) -> Self {
        self.professor.push(summary);
        self
    }

    /// Everything fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    fn record(&self, what: String) {
        debug!(%what, "fake repository fetch");
        self.fetched.lock().unwrap().push(what);
    }
}

impl CourseRepository for FakeRepository {
    fn student_courses(&self) -> RepoFuture<'_, Vec<StudentCourseSummary>> {
        self.record("student_courses".to_string());
        let courses = self.student.clone();
        Box::pin(async move { Ok(courses) })
    }

    fn professor_courses(&self) -> RepoFuture<'_, Vec<ProfessorCourseSummary>> {
        self.record("professor_courses".to_string());
        let courses = self.professor.clone();
        Box::pin(async move { Ok(courses) })
    }

    fn course<'a>(&'a self, course_id: &'a str) -> RepoFuture<'a, CourseFixture> {
        self.record(format!("course:{course_id}"));
        let result = self
            .courses
            .get(course_id)
            .cloned()
            .ok_or_else(|| CoursemapError::CourseNotFound(course_id.to_string()));
        Box::pin(async move { result })
    }
}
