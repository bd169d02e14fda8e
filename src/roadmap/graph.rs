// src/roadmap/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{CoursemapError, Result};
use crate::roadmap::edge::RoadmapEdge;
use crate::roadmap::node::RoadmapNode;
use crate::types::NodeStatus;

/// Validated course roadmap: nodes, prerequisite edges and a topological
/// order over the nodes.
///
/// Node records are never removed. Only the status engine replaces them
/// (by id) through [`RoadmapGraph::replace_node`].
#[derive(Debug, Clone)]
pub struct RoadmapGraph {
    nodes: Vec<RoadmapNode>,
    edges: Vec<RoadmapEdge>,
    /// Node id -> index into `nodes`.
    index: HashMap<String, usize>,
    /// Node id -> indices into `edges` whose target is that node.
    incoming: HashMap<String, Vec<usize>>,
    /// Node id -> indices into `edges` whose source is that node.
    outgoing: HashMap<String, Vec<usize>>,
    /// Node indices, sources before targets.
    topo_order: Vec<usize>,
}

impl RoadmapGraph {
    /// Build and validate a roadmap.
    ///
    /// Fails when:
    /// - node or edge ids are duplicated,
    /// - an edge references an unknown node,
    /// - the edges contain a cycle (self-loops included),
    /// - a node violates its per-kind field invariants.
    pub fn new(nodes: Vec<RoadmapNode>, edges: Vec<RoadmapEdge>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            node.check_fields()?;
            if index.insert(node.id.clone(), i).is_some() {
                return Err(CoursemapError::Validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }

        let mut edge_ids = HashSet::with_capacity(edges.len());
        let mut incoming: HashMap<String, Vec<usize>> = HashMap::new();
        let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, edge) in edges.iter().enumerate() {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(CoursemapError::Validation(format!(
                    "duplicate edge id '{}'",
                    edge.id
                )));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint) {
                    return Err(CoursemapError::Validation(format!(
                        "edge '{}' references unknown node '{}'",
                        edge.id, endpoint
                    )));
                }
            }
            if edge.source == edge.target {
                return Err(CoursemapError::Cycle(format!(
                    "edge '{}' makes node '{}' its own prerequisite",
                    edge.id, edge.source
                )));
            }
            incoming.entry(edge.target.clone()).or_default().push(i);
            outgoing.entry(edge.source.clone()).or_default().push(i);
        }

        let topo_order = topological_indices(&nodes, &edges, &index)?;

        Ok(Self {
            nodes,
            edges,
            index,
            incoming,
            outgoing,
            topo_order,
        })
    }

    pub fn nodes(&self) -> &[RoadmapNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RoadmapEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&RoadmapNode> {
        self.index.get(id).and_then(|&i| self.nodes.get(i))
    }

    /// Nodes currently in `status`, in declaration order.
    pub fn nodes_by_status(&self, status: NodeStatus) -> Vec<&RoadmapNode> {
        self.nodes.iter().filter(|n| n.status == status).collect()
    }

    /// Edges whose target is `id` (its prerequisites).
    pub fn incoming_edges(&self, id: &str) -> Vec<&RoadmapEdge> {
        self.edges_at(&self.incoming, id)
    }

    /// Edges whose source is `id` (what it unlocks).
    pub fn outgoing_edges(&self, id: &str) -> Vec<&RoadmapEdge> {
        self.edges_at(&self.outgoing, id)
    }

    /// Source nodes of every incoming edge of `id`.
    pub fn prerequisites_of(&self, id: &str) -> Vec<&RoadmapNode> {
        self.incoming_edges(id)
            .into_iter()
            .filter_map(|e| self.node(&e.source))
            .collect()
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.incoming.get(id).is_none_or(|edges| edges.is_empty())
    }

    /// Nodes with no incoming edges.
    pub fn roots(&self) -> Vec<&RoadmapNode> {
        self.nodes.iter().filter(|n| self.is_root(&n.id)).collect()
    }

    /// Whether every prerequisite of `id` is completed. Trivially true for roots.
    pub fn prerequisites_completed(&self, id: &str) -> bool {
        self.prerequisites_of(id).iter().all(|n| n.is_completed())
    }

    /// Nodes ordered so that every edge source comes before its target.
    pub fn topological_order(&self) -> impl Iterator<Item = &RoadmapNode> {
        self.topo_order.iter().filter_map(|&i| self.nodes.get(i))
    }

    /// Swap in a new record for an existing node id.
    pub(crate) fn replace_node(&mut self, node: RoadmapNode) -> Result<()> {
        let i = *self
            .index
            .get(&node.id)
            .ok_or_else(|| CoursemapError::NodeNotFound(node.id.clone()))?;
        node.check_fields()?;
        if let Some(slot) = self.nodes.get_mut(i) {
            *slot = node;
        }
        Ok(())
    }

    fn edges_at(&self, map: &HashMap<String, Vec<usize>>, id: &str) -> Vec<&RoadmapEdge> {
        map.get(id)
            .map(|ixs| ixs.iter().filter_map(|&i| self.edges.get(i)).collect())
            .unwrap_or_default()
    }
}

fn topological_indices(
    nodes: &[RoadmapNode],
    edges: &[RoadmapEdge],
    index: &HashMap<String, usize>,
) -> Result<Vec<usize>> {
    // Edge direction: prerequisite -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for node in nodes {
        graph.add_node(node.id.as_str());
    }
    for edge in edges {
        graph.add_edge(edge.source.as_str(), edge.target.as_str(), ());
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order
            .into_iter()
            .filter_map(|id| index.get(id).copied())
            .collect()),
        Err(cycle) => Err(CoursemapError::Cycle(format!(
            "cycle detected in roadmap involving node '{}'",
            cycle.node_id()
        ))),
    }
}
