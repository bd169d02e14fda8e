// src/config/mod.rs

//! Course catalog loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a catalog file from disk (`loader.rs`).
//! - Validate it into roadmaps and question sets (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_catalog_path, load_and_validate, load_from_path, parse_and_validate};
pub use model::{
    CatalogFile, ConfigSection, CourseFixture, CourseQuiz, ProfessorCourseSummary, RawCatalogFile,
    RawCourse, RawEdgeRecord, RawNodeData, RawNodeKind, RawNodeRecord, RawQuestion, RawQuiz,
    StudentCourseSummary,
};
