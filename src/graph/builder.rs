//! Fluent API for building RelationshipGraph instances.

use crate::types::{GraphResult, Relation};

use super::RelationshipGraph;

/// Fluent builder for constructing a RelationshipGraph.
///
/// People and edges are recorded in call order and applied by [`build`],
/// so edges may name people added later in the chain.
///
/// [`build`]: GraphBuilder::build
#[derive(Debug, Default)]
pub struct GraphBuilder {
    people: Vec<String>,
    edges: Vec<(String, String, Relation)>,
}

impl GraphBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person.
    pub fn person(&mut self, name: &str) -> &mut Self {
        self.people.push(name.to_string());
        self
    }

    /// Add several people.
    pub fn people(&mut self, names: &[&str]) -> &mut Self {
        for name in names {
            self.person(name);
        }
        self
    }

    /// Add a single directed edge, with no mirror.
    pub fn link(&mut self, from: &str, to: &str, relation: Relation) -> &mut Self {
        self.edges
            .push((from.to_string(), to.to_string(), relation));
        self
    }

    /// Add `parent hasChild child` and `child hasParent parent`.
    pub fn parent_of(&mut self, parent: &str, child: &str) -> &mut Self {
        self.link(parent, child, Relation::Child)
            .link(child, parent, Relation::Parent)
    }

    /// Add `hasSpouse` in both directions.
    pub fn spouses(&mut self, a: &str, b: &str) -> &mut Self {
        self.link(a, b, Relation::Spouse).link(b, a, Relation::Spouse)
    }

    /// Add `hasFriend` in both directions.
    pub fn friends(&mut self, a: &str, b: &str) -> &mut Self {
        self.link(a, b, Relation::Friend).link(b, a, Relation::Friend)
    }

    /// Build the final RelationshipGraph, failing on the first duplicate
    /// person or unknown endpoint.
    pub fn build(&self) -> GraphResult<RelationshipGraph> {
        let mut graph = RelationshipGraph::new();
        for name in &self.people {
            graph.add_node(name)?;
        }
        for (from, to, relation) in &self.edges {
            graph.add_edge(from, to, relation.clone())?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GraphError;

    #[test]
    fn parent_of_adds_both_directions() {
        let graph = GraphBuilder::new()
            .people(&["Mom", "Kid"])
            .parent_of("Mom", "Kid")
            .build()
            .unwrap();
        assert_eq!(graph.child_nodes("Mom")[0].name(), "Kid");
        let kid = graph.get_node("Kid").unwrap();
        assert_eq!(kid.edges_with(&Relation::Parent).count(), 1);
    }

    #[test]
    fn edges_may_precede_people() {
        let graph = GraphBuilder::new()
            .friends("A", "B")
            .people(&["A", "B"])
            .build()
            .unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn build_reports_unknown_endpoint() {
        let err = GraphBuilder::new()
            .person("A")
            .spouses("A", "Ghost")
            .build()
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownEndpoint(ref n) if n == "Ghost"));
    }
}
