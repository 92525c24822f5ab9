//! Person nodes and their arena identifiers.

use serde::Serialize;

use super::edge::{GraphEdge, Relation};

/// Index of a node in its graph's arena. Assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position in the node arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single person and the relationships that start at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    id: NodeId,
    name: String,
    edges: Vec<GraphEdge>,
}

impl GraphNode {
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            edges: Vec::new(),
        }
    }

    /// Arena identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The person's name, unique within the graph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an outgoing edge. Only this node's edge list changes.
    pub(crate) fn add_edge(&mut self, relation: Relation, target: NodeId) {
        self.edges.push(GraphEdge::new(self.id, target, relation));
    }

    /// All outgoing edges, in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Outgoing edges with the given label, in insertion order.
    /// Parallel duplicates are all returned.
    pub fn edges_with<'a>(
        &'a self,
        relation: &'a Relation,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| &e.relation == relation)
    }

    /// Whether at least one outgoing edge carries this label.
    pub fn has_relation(&self, relation: &Relation) -> bool {
        self.edges.iter().any(|e| &e.relation == relation)
    }
}
