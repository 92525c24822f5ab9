//! Query executor: read-only views over a relationship graph.

use serde::Serialize;

use crate::graph::traversal::{descendants, generation_label, DescendantOutcome, VisitSet};
use crate::graph::RelationshipGraph;
use crate::types::{GraphNode, GraphResult, Relation};

/// One outgoing relationship of a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationView<'g> {
    pub relation: &'g Relation,
    pub target: &'g str,
}

/// A person and all their outgoing relationships, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonView<'g> {
    pub name: &'g str,
    pub relationships: Vec<RelationView<'g>>,
}

/// One generation of descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationView<'g> {
    /// 0 for children, 1 for grandchildren, ...
    pub generation: usize,
    /// Presentation label, e.g. "great grandchildren".
    pub label: String,
    pub people: Vec<&'g str>,
}

/// Result of a descendant query that did not hit a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "generations", rename_all = "snake_case")]
pub enum DescendantQuery<'g> {
    UnknownPerson,
    NoDescendants,
    Found(Vec<GenerationView<'g>>),
}

/// The query engine. Holds a reusable visit set for descendant traversals.
#[derive(Debug, Default)]
pub struct QueryEngine {
    visits: VisitSet,
}

impl QueryEngine {
    /// Create a new query engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// A person's relationships, or `None` if not in the graph.
    pub fn person<'g>(&self, graph: &'g RelationshipGraph, name: &str) -> Option<PersonView<'g>> {
        let node = graph.get_node(name)?;
        Some(PersonView {
            name: node.name(),
            relationships: node
                .edges()
                .iter()
                .filter_map(|e| {
                    graph.target(e).map(|t| RelationView {
                        relation: &e.relation,
                        target: t.name(),
                    })
                })
                .collect(),
        })
    }

    /// Targets of a person's `hasFriend` edges, duplicates included.
    pub fn friends<'g>(&self, graph: &'g RelationshipGraph, name: &str) -> Option<Vec<&'g str>> {
        self.related(graph, name, &Relation::Friend)
    }

    /// Targets of a person's edges with the given label.
    pub fn related<'g>(
        &self,
        graph: &'g RelationshipGraph,
        name: &str,
        relation: &Relation,
    ) -> Option<Vec<&'g str>> {
        let node = graph.get_node(name)?;
        Some(
            node.edges_with(relation)
                .filter_map(|e| graph.target(e).map(GraphNode::name))
                .collect(),
        )
    }

    /// Names of everyone with no recorded parent.
    pub fn orphans<'g>(&self, graph: &'g RelationshipGraph) -> Vec<&'g str> {
        graph.orphans().into_iter().map(GraphNode::name).collect()
    }

    /// Descendants of a person grouped and labeled by generation.
    pub fn descendants<'g>(
        &mut self,
        graph: &'g RelationshipGraph,
        name: &str,
    ) -> GraphResult<DescendantQuery<'g>> {
        let outcome = descendants(graph, name, &mut self.visits)?;
        Ok(match outcome {
            DescendantOutcome::UnknownPerson => DescendantQuery::UnknownPerson,
            DescendantOutcome::NoDescendants => DescendantQuery::NoDescendants,
            DescendantOutcome::Found(gens) => DescendantQuery::Found(
                gens.iter()
                    .map(|(generation, people)| GenerationView {
                        generation,
                        label: generation_label(generation),
                        people: people.iter().map(|n| n.name()).collect(),
                    })
                    .collect(),
            ),
        })
    }
}
