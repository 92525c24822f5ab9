//! Core graph structure: an arena of people with a name index.

use std::collections::HashMap;
use std::fmt;

use crate::types::{GraphEdge, GraphError, GraphNode, GraphResult, NodeId, Relation};

/// Directed, labeled multigraph of people.
///
/// Nodes are stored in insertion order and are never removed. Edges live in
/// the outgoing list of their source node and refer to endpoints by
/// [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    /// All nodes, indexed by `NodeId`.
    nodes: Vec<GraphNode>,
    /// Name -> arena index.
    index: HashMap<String, NodeId>,
}

impl RelationshipGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges across all nodes, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges().len()).sum()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a person with no relationships, returns the assigned ID.
    pub fn add_node(&mut self, name: &str) -> GraphResult<NodeId> {
        if self.index.contains_key(name) {
            return Err(GraphError::DuplicateNode(name.to_string()));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode::new(id, name));
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Append an edge to `from`'s outgoing list.
    ///
    /// Both people must already exist. Mirrored edges are not added here;
    /// that policy belongs to the ingestion layer.
    pub fn add_edge(&mut self, from: &str, to: &str, relation: Relation) -> GraphResult<()> {
        let from_id = self
            .node_id(from)
            .ok_or_else(|| GraphError::UnknownEndpoint(from.to_string()))?;
        let to_id = self
            .node_id(to)
            .ok_or_else(|| GraphError::UnknownEndpoint(to.to_string()))?;
        self.nodes[from_id.index()].add_edge(relation, to_id);
        Ok(())
    }

    /// Look up a node ID by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Get a node by name.
    pub fn get_node(&self, name: &str) -> Option<&GraphNode> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// The node an edge points at.
    pub fn target(&self, edge: &GraphEdge) -> Option<&GraphNode> {
        self.node(edge.to)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Targets of `hasChild` edges from the named person, in edge order.
    /// Empty if the person is unknown or has no children.
    pub fn child_nodes(&self, name: &str) -> Vec<&GraphNode> {
        match self.get_node(name) {
            Some(node) => self.children_of(node).collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn children_of<'a>(
        &'a self,
        node: &'a GraphNode,
    ) -> impl Iterator<Item = &'a GraphNode> + 'a {
        node.edges()
            .iter()
            .filter(|e| e.relation == Relation::Child)
            .filter_map(move |e| self.node(e.to))
    }

    /// Every person with no outgoing `hasParent` edge, in insertion order.
    pub fn orphans(&self) -> Vec<&GraphNode> {
        self.nodes
            .iter()
            .filter(|n| !n.has_relation(&Relation::Parent))
            .collect()
    }

    /// Human-readable rendering of one node: its name, then one
    /// `relation: target` line per outgoing edge.
    pub fn describe(&self, node: &GraphNode) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_node(&mut out, node);
        out
    }

    /// Human-readable rendering of the whole graph in insertion order.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn write_node(&self, f: &mut impl fmt::Write, node: &GraphNode) -> fmt::Result {
        writeln!(f, "{}", node.name())?;
        for edge in node.edges() {
            let target = self.node(edge.to).map(GraphNode::name).unwrap_or("?");
            writeln!(f, "    {}: {}", edge.relation, target)?;
        }
        Ok(())
    }
}

impl fmt::Display for RelationshipGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            self.write_node(f, node)?;
        }
        Ok(())
    }
}
