#![allow(dead_code)]

pub use coursemap_test_utils::builders;
pub use coursemap_test_utils::fake_repository;
pub use coursemap_test_utils::{init_tracing, with_timeout};

use coursemap::roadmap::RoadmapGraph;
use coursemap::types::NodeStatus;

use self::builders::{NodeBuilder, RoadmapBuilder};

/// `A -> B -> C`, all topics, only `A` available.
pub fn chain_abc() -> RoadmapGraph {
    RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::Available))
        .node(NodeBuilder::topic("B"))
        .node(NodeBuilder::topic("C"))
        .edge("A", "B")
        .edge("B", "C")
        .build()
}

/// Diamond: `root -> {left, right} -> join`, with an assessment on the left.
pub fn diamond() -> RoadmapGraph {
    RoadmapBuilder::new()
        .node(NodeBuilder::topic("root").status(NodeStatus::Available))
        .node(NodeBuilder::assessment("left"))
        .node(NodeBuilder::topic("right"))
        .node(NodeBuilder::milestone("join"))
        .edge("root", "left")
        .edge("root", "right")
        .edge("left", "join")
        .edge("right", "join")
        .build()
}

pub fn status(graph: &RoadmapGraph, id: &str) -> NodeStatus {
    graph
        .node(id)
        .map(|n| n.status)
        .unwrap_or_else(|| panic!("node {id} missing"))
}
