// src/roadmap/mod.rs

//! Course roadmap: the learning-path graph and its status engine.
//!
//! - [`node`] and [`edge`] define the typed vertices and prerequisite edges.
//! - [`graph`] validates them into a DAG and answers adjacency queries.
//! - [`status`] applies completion and progress events and unlocks
//!   downstream nodes.
//! - [`status_step`] describes what a single event changed.

pub mod edge;
pub mod graph;
pub mod node;
pub mod status;
pub mod status_step;

pub use edge::RoadmapEdge;
pub use graph::RoadmapGraph;
pub use node::{NodeKind, Position, Resource, RoadmapNode};
pub use status::{
    apply_completion, CompletionEvent, CompletionResult, ProgressEvent, StatusEngine,
};
pub use status_step::StatusStep;
