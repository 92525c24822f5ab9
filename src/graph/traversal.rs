//! Descendant traversal: generation-grouped BFS over `hasChild` edges.
//!
//! Visit markers live in a caller-owned [`VisitSet`] rather than on the
//! nodes, so a traversal only needs `&RelationshipGraph`. The set is cleared
//! before and after every traversal, whatever the outcome.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::types::{GraphError, GraphNode, GraphResult, NodeId, Relation};

use super::RelationshipGraph;

/// Traversal marker for a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached by the current traversal.
    #[default]
    Unvisited,
    /// On the current depth-first path of the cycle check.
    OnPath,
    /// Fully explored / already placed in a generation.
    Visited,
}

/// Per-traversal visit markers, indexed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct VisitSet {
    states: Vec<VisitState>,
}

impl VisitSet {
    /// Create an empty visit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visit set pre-sized for a graph.
    pub fn for_graph(graph: &RelationshipGraph) -> Self {
        Self {
            states: vec![VisitState::Unvisited; graph.node_count()],
        }
    }

    /// Marker of a node; nodes never marked are `Unvisited`.
    pub fn state(&self, id: NodeId) -> VisitState {
        self.states.get(id.index()).copied().unwrap_or_default()
    }

    fn mark(&mut self, id: NodeId, state: VisitState) {
        let idx = id.index();
        if idx >= self.states.len() {
            self.states.resize(idx + 1, VisitState::Unvisited);
        }
        self.states[idx] = state;
    }

    /// Set every marker back to `Unvisited`.
    pub fn reset(&mut self) {
        self.states.fill(VisitState::Unvisited);
    }

    /// True when no node carries a marker.
    pub fn is_clear(&self) -> bool {
        self.states.iter().all(|s| *s == VisitState::Unvisited)
    }
}

/// Descendants grouped by generation: index 0 holds children, 1
/// grandchildren, and so on. Every generation is non-empty and every person
/// appears in exactly one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generations<'g> {
    levels: Vec<Vec<&'g GraphNode>>,
}

impl<'g> Generations<'g> {
    /// Number of generations.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there are no generations at all.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// People in one generation.
    pub fn get(&self, generation: usize) -> Option<&[&'g GraphNode]> {
        self.levels.get(generation).map(Vec::as_slice)
    }

    /// Iterate `(generation, people)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[&'g GraphNode])> + '_ {
        self.levels.iter().map(Vec::as_slice).enumerate()
    }

    /// Names in one generation.
    pub fn names(&self, generation: usize) -> Vec<&'g str> {
        self.get(generation)
            .map(|level| level.iter().map(|n| n.name()).collect())
            .unwrap_or_default()
    }

    /// Total number of descendants across all generations.
    pub fn total(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Generation of a named descendant, if present.
    pub fn generation_of(&self, name: &str) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|n| n.name() == name))
    }
}

/// Outcome of a descendant query that did not hit a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum DescendantOutcome<'g> {
    /// The start person is not in the graph.
    UnknownPerson,
    /// The start person has no `hasChild` edges.
    NoDescendants,
    /// At least one generation of descendants.
    Found(Generations<'g>),
}

/// Presentation label for a generation number: "children", "grandchildren",
/// then one more "great" per further generation.
pub fn generation_label(generation: usize) -> String {
    match generation {
        0 => "children".to_string(),
        1 => "grandchildren".to_string(),
        k => format!("{}grandchildren", "great ".repeat(k - 1)),
    }
}

/// Enumerate the descendants of `start`, grouped by generation.
///
/// Returns [`GraphError::CycleDetected`] if any `hasChild` path from
/// `start` leads back onto itself; no partial generations are returned in
/// that case. `visits` is clear on return.
pub fn descendants<'g>(
    graph: &'g RelationshipGraph,
    start: &str,
    visits: &mut VisitSet,
) -> GraphResult<DescendantOutcome<'g>> {
    visits.reset();
    let outcome = collect_generations(graph, start, visits);
    visits.reset();
    outcome
}

fn collect_generations<'g>(
    graph: &'g RelationshipGraph,
    start: &str,
    visits: &mut VisitSet,
) -> GraphResult<DescendantOutcome<'g>> {
    let Some(root) = graph.get_node(start) else {
        return Ok(DescendantOutcome::UnknownPerson);
    };
    if graph.children_of(root).next().is_none() {
        return Ok(DescendantOutcome::NoDescendants);
    }

    if let Some(revisited) = find_child_cycle(graph, root, visits) {
        warn!(
            "Cycle detected below {}: {} is its own descendant",
            root.name(),
            revisited.name()
        );
        return Err(GraphError::CycleDetected {
            start: root.name().to_string(),
            revisited: revisited.name().to_string(),
        });
    }
    visits.reset();

    visits.mark(root.id(), VisitState::Visited);
    let mut queue: VecDeque<&'g GraphNode> = VecDeque::new();
    let mut levels: Vec<Vec<&'g GraphNode>> = Vec::new();

    let mut first = Vec::new();
    for child in graph.children_of(root) {
        if visits.state(child.id()) == VisitState::Unvisited {
            visits.mark(child.id(), VisitState::Visited);
            queue.push_back(child);
            first.push(child);
        }
    }
    // Nodes of the generation being drained that are still in the queue.
    let mut remaining = first.len();
    levels.push(first);

    let mut next = Vec::new();
    while let Some(node) = queue.pop_front() {
        for child in graph.children_of(node) {
            if visits.state(child.id()) == VisitState::Unvisited {
                visits.mark(child.id(), VisitState::Visited);
                queue.push_back(child);
                next.push(child);
            }
        }
        remaining = remaining.saturating_sub(1);
        if remaining == 0 && !next.is_empty() {
            remaining = next.len();
            levels.push(std::mem::take(&mut next));
        }
    }

    debug!(
        "{} has {} generation(s) of descendants",
        root.name(),
        levels.len()
    );
    Ok(DescendantOutcome::Found(Generations { levels }))
}

/// Depth-first search over `hasChild` edges reachable from `root`.
/// Returns the first node reached again while still on the current path.
fn find_child_cycle<'g>(
    graph: &'g RelationshipGraph,
    root: &'g GraphNode,
    visits: &mut VisitSet,
) -> Option<&'g GraphNode> {
    // (node, index of the next outgoing edge to examine)
    let mut stack: Vec<(&'g GraphNode, usize)> = vec![(root, 0)];
    visits.mark(root.id(), VisitState::OnPath);

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let edge = node.edges().get(frame.1);
        frame.1 += 1;

        let Some(edge) = edge else {
            visits.mark(node.id(), VisitState::Visited);
            stack.pop();
            continue;
        };
        if edge.relation != Relation::Child {
            continue;
        }
        let Some(child) = graph.node(edge.to) else {
            continue;
        };
        match visits.state(child.id()) {
            VisitState::OnPath => return Some(child),
            VisitState::Unvisited => {
                visits.mark(child.id(), VisitState::OnPath);
                stack.push((child, 0));
            }
            VisitState::Visited => {}
        }
    }
    None
}

impl RelationshipGraph {
    /// Enumerate descendants of `start` with a fresh visit set.
    pub fn descendants(&self, start: &str) -> GraphResult<DescendantOutcome<'_>> {
        let mut visits = VisitSet::for_graph(self);
        descendants(self, start, &mut visits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(names: &[&str], children: &[(&str, &str)]) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new();
        for name in names {
            graph.add_node(name).unwrap();
        }
        for (parent, child) in children {
            graph.add_edge(parent, child, Relation::Child).unwrap();
        }
        graph
    }

    fn found<'g>(outcome: DescendantOutcome<'g>) -> Generations<'g> {
        match outcome {
            DescendantOutcome::Found(g) => g,
            other => panic!("Expected generations, got {:?}", other),
        }
    }

    #[test]
    fn labels_follow_great_prefix_rule() {
        assert_eq!(generation_label(0), "children");
        assert_eq!(generation_label(1), "grandchildren");
        assert_eq!(generation_label(2), "great grandchildren");
        assert_eq!(generation_label(3), "great great grandchildren");
        assert_eq!(generation_label(5), "great great great great grandchildren");
    }

    #[test]
    fn unknown_and_childless_starts() {
        let graph = graph_with(&["A"], &[]);
        assert_eq!(
            graph.descendants("nobody").unwrap(),
            DescendantOutcome::UnknownPerson
        );
        assert_eq!(
            graph.descendants("A").unwrap(),
            DescendantOutcome::NoDescendants
        );
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let graph = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let gens = found(graph.descendants("A").unwrap());
        assert_eq!(gens.names(0), vec!["B", "C"]);
        assert_eq!(gens.names(1), vec!["D"]);
        assert_eq!(gens.len(), 2);
    }

    #[test]
    fn cross_generation_edge_keeps_shortest_distance() {
        // B is both a child and a grandchild of A.
        let graph = graph_with(&["A", "B", "C"], &[("A", "B"), ("A", "C"), ("C", "B")]);
        let gens = found(graph.descendants("A").unwrap());
        assert_eq!(gens.names(0), vec!["B", "C"]);
        assert_eq!(gens.len(), 1);
    }

    #[test]
    fn duplicate_child_edges_report_child_once() {
        let graph = graph_with(&["A", "B"], &[("A", "B"), ("A", "B")]);
        assert_eq!(graph.child_nodes("A").len(), 2);
        let gens = found(graph.descendants("A").unwrap());
        assert_eq!(gens.names(0), vec!["B"]);
        assert_eq!(gens.total(), 1);
    }

    #[test]
    fn cycle_below_start_is_detected() {
        let graph = graph_with(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "B")]);
        let mut visits = VisitSet::for_graph(&graph);
        let err = descendants(&graph, "A", &mut visits).unwrap_err();
        match err {
            GraphError::CycleDetected { start, revisited } => {
                assert_eq!(start, "A");
                assert_eq!(revisited, "B");
            }
            e => panic!("Expected CycleDetected, got {:?}", e),
        }
        assert!(visits.is_clear());
    }

    #[test]
    fn self_parenting_is_a_cycle() {
        let graph = graph_with(&["A"], &[("A", "A")]);
        assert!(matches!(
            graph.descendants("A"),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn visit_set_is_clear_after_success() {
        let graph = graph_with(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let mut visits = VisitSet::new();
        let gens = found(descendants(&graph, "A", &mut visits).unwrap());
        assert_eq!(gens.generation_of("C"), Some(1));
        assert!(visits.is_clear());
    }
}
