// tests/roadmap_graph.rs

mod common;
use crate::common::builders::{NodeBuilder, RoadmapBuilder};
use crate::common::{chain_abc, diamond, init_tracing};

use std::error::Error;

use coursemap::errors::CoursemapError;
use coursemap::roadmap::{NodeKind, Position, RoadmapEdge, RoadmapNode};
use coursemap::types::NodeStatus;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn queries_follow_edges() -> TestResult {
    init_tracing();
    let graph = diamond();

    let incoming: Vec<&str> = graph
        .incoming_edges("join")
        .iter()
        .map(|e| e.source.as_str())
        .collect();
    assert_eq!(incoming, vec!["left", "right"]);

    let outgoing: Vec<&str> = graph
        .outgoing_edges("root")
        .iter()
        .map(|e| e.target.as_str())
        .collect();
    assert_eq!(outgoing, vec!["left", "right"]);

    assert!(graph.incoming_edges("root").is_empty());
    assert!(graph.outgoing_edges("join").is_empty());
    assert!(graph.incoming_edges("nope").is_empty());

    let prereqs: Vec<&str> = graph
        .prerequisites_of("join")
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(prereqs, vec!["left", "right"]);

    let roots: Vec<&str> = graph.roots().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(roots, vec!["root"]);
    assert!(graph.is_root("root"));
    assert!(!graph.is_root("join"));

    Ok(())
}

#[test]
fn nodes_by_status_keeps_declaration_order() {
    let graph = diamond();

    let locked: Vec<&str> = graph
        .nodes_by_status(NodeStatus::Locked)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(locked, vec!["left", "right", "join"]);

    assert_eq!(graph.nodes_by_status(NodeStatus::Available).len(), 1);
    assert!(graph.nodes_by_status(NodeStatus::Completed).is_empty());
}

#[test]
fn topological_order_puts_sources_first() {
    let graph = diamond();
    let order: Vec<&str> = graph.topological_order().map(|n| n.id.as_str()).collect();

    assert_eq!(order.len(), 4);
    let pos = |id: &str| order.iter().position(|n| *n == id).unwrap();
    for edge in graph.edges() {
        assert!(
            pos(&edge.source) < pos(&edge.target),
            "{} should come before {}",
            edge.source,
            edge.target
        );
    }
}

#[test]
fn dangling_edge_is_a_validation_error() {
    let result = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::Available))
        .edge("A", "ghost")
        .try_build();

    match result {
        Err(CoursemapError::Validation(msg)) => {
            assert!(msg.contains("unknown node 'ghost'"), "message: {msg}");
        }
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn cycle_is_rejected() {
    let result = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A"))
        .node(NodeBuilder::topic("B"))
        .node(NodeBuilder::topic("C"))
        .edge("A", "B")
        .edge("B", "C")
        .edge("C", "A")
        .try_build();

    match result {
        Err(e @ CoursemapError::Cycle(_)) => {
            assert!(e.is_validation());
            assert!(e.to_string().contains("cycle detected"));
        }
        other => panic!("Expected Cycle error, got: {:?}", other),
    }
}

#[test]
fn self_loop_is_rejected() {
    let result = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::Available))
        .edge("A", "A")
        .try_build();

    assert!(matches!(result, Err(CoursemapError::Cycle(_))));
}

#[test]
fn duplicate_ids_are_rejected() {
    let nodes = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A"))
        .node(NodeBuilder::milestone("A"))
        .try_build();
    assert!(matches!(nodes, Err(CoursemapError::Validation(_))));

    let edges = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A"))
        .node(NodeBuilder::topic("B"))
        .raw_edge(RoadmapEdge::new("e", "A", "B"))
        .raw_edge(RoadmapEdge::new("e", "A", "B"))
        .try_build();
    assert!(matches!(edges, Err(CoursemapError::Validation(_))));
}

#[test]
fn assessment_score_requires_completion() {
    let scored_but_available = RoadmapNode {
        id: "quiz".to_string(),
        title: "Quiz".to_string(),
        description: String::new(),
        status: NodeStatus::Available,
        position: Position::default(),
        kind: NodeKind::Assessment {
            score_percent: Some(80),
        },
    };
    let result = RoadmapBuilder::new().raw_node(scored_but_available).try_build();
    assert!(matches!(result, Err(CoursemapError::Validation(_))));

    let completed_without_score = RoadmapNode {
        id: "quiz".to_string(),
        title: "Quiz".to_string(),
        description: String::new(),
        status: NodeStatus::Completed,
        position: Position::default(),
        kind: NodeKind::Assessment {
            score_percent: None,
        },
    };
    let result = RoadmapBuilder::new()
        .raw_node(completed_without_score)
        .try_build();
    assert!(matches!(result, Err(CoursemapError::Validation(_))));
}

#[test]
fn topic_progress_must_match_status() {
    let locked_with_progress = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").progress(20))
        .try_build();
    assert!(matches!(
        locked_with_progress,
        Err(CoursemapError::Validation(_))
    ));

    let completed_partial = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::Completed).progress(90))
        .try_build();
    assert!(matches!(completed_partial, Err(CoursemapError::Validation(_))));

    let negative_hours = RoadmapBuilder::new()
        .node(NodeBuilder::topic("A").status(NodeStatus::Available).hours(-1.0))
        .try_build();
    assert!(matches!(negative_hours, Err(CoursemapError::Validation(_))));
}

#[test]
fn unknown_node_lookups_are_empty() {
    let graph = chain_abc();
    assert!(graph.node("Z").is_none());
    assert!(!graph.contains("Z"));
    assert!(graph.prerequisites_of("Z").is_empty());
    assert_eq!(graph.len(), 3);
}
