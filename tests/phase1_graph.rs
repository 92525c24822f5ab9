//! Phase 1 tests: Data model + graph construction and lookup.

use kinship_graph::graph::{GraphBuilder, RelationshipGraph};
use kinship_graph::types::{GraphError, NodeId, Relation};

fn people(names: &[&str]) -> RelationshipGraph {
    let mut graph = RelationshipGraph::new();
    for name in names {
        graph.add_node(name).unwrap();
    }
    graph
}

// ==================== Node Tests ====================

#[test]
fn test_add_node_assigns_sequential_ids() {
    let mut graph = RelationshipGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.add_node("Alice").unwrap(), NodeId(0));
    assert_eq!(graph.add_node("Bob").unwrap(), NodeId(1));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.node(NodeId(1)).unwrap().name(), "Bob");
    assert_eq!(graph.node_id("Alice"), Some(NodeId(0)));
}

#[test]
fn test_duplicate_node_fails_and_keeps_one() {
    let mut graph = people(&["X"]);
    match graph.add_node("X") {
        Err(GraphError::DuplicateNode(name)) => assert_eq!(name, "X"),
        other => panic!("Expected DuplicateNode, got {:?}", other),
    }
    assert_eq!(graph.node_count(), 1);
    assert_eq!(
        graph.nodes().iter().filter(|n| n.name() == "X").count(),
        1
    );
}

#[test]
fn test_get_node_never_creates() {
    let graph = people(&["A"]);
    assert!(graph.get_node("B").is_none());
    assert_eq!(graph.node_count(), 1);
}

// ==================== Edge Tests ====================

#[test]
fn test_edges_preserve_insertion_order() {
    let mut graph = people(&["A", "B", "C"]);
    graph.add_edge("A", "C", Relation::Friend).unwrap();
    graph.add_edge("A", "B", Relation::Spouse).unwrap();
    graph.add_edge("A", "B", Relation::Friend).unwrap();

    let a = graph.get_node("A").unwrap();
    let labels: Vec<&str> = a.edges().iter().map(|e| e.relation.name()).collect();
    assert_eq!(labels, vec!["hasFriend", "hasSpouse", "hasFriend"]);

    let friends: Vec<&str> = a
        .edges_with(&Relation::Friend)
        .map(|e| graph.target(e).unwrap().name())
        .collect();
    assert_eq!(friends, vec!["C", "B"]);
}

#[test]
fn test_edge_endpoints_reference_graph_nodes() {
    let mut graph = people(&["A", "B"]);
    graph.add_edge("A", "B", Relation::Child).unwrap();
    let edge = &graph.get_node("A").unwrap().edges()[0];
    assert_eq!(edge.from, graph.node_id("A").unwrap());
    assert_eq!(edge.to, graph.node_id("B").unwrap());
}

#[test]
fn test_unknown_endpoint_leaves_graph_untouched() {
    let mut graph = people(&["A"]);
    let before = graph.dump();
    assert!(matches!(
        graph.add_edge("A", "Nobody", Relation::Parent),
        Err(GraphError::UnknownEndpoint(_))
    ));
    assert_eq!(graph.dump(), before);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_arbitrary_relation_labels_are_accepted() {
    let mut graph = people(&["A", "B"]);
    graph
        .add_edge("A", "B", Relation::from_name("hasGodparent"))
        .unwrap();
    let a = graph.get_node("A").unwrap();
    assert_eq!(
        a.edges_with(&Relation::from_name("hasGodparent")).count(),
        1
    );
}

#[test]
fn test_identical_edges_are_not_deduplicated() {
    let mut graph = people(&["A", "B"]);
    graph.add_edge("A", "B", Relation::Child).unwrap();
    graph.add_edge("A", "B", Relation::Child).unwrap();
    let children: Vec<&str> = graph.child_nodes("A").iter().map(|n| n.name()).collect();
    assert_eq!(children, vec!["B", "B"]);
}

// ==================== Child Lookup Tests ====================

#[test]
fn test_child_nodes_only_with_explicit_mirror() {
    let mut graph = people(&["A", "B"]);
    graph.add_edge("A", "B", Relation::Parent).unwrap();
    assert!(graph.child_nodes("B").is_empty());

    graph.add_edge("B", "A", Relation::Child).unwrap();
    let children: Vec<&str> = graph.child_nodes("B").iter().map(|n| n.name()).collect();
    assert_eq!(children, vec!["A"]);
}

#[test]
fn test_child_nodes_of_unknown_person_is_empty() {
    let graph = people(&["A"]);
    assert!(graph.child_nodes("Ghost").is_empty());
    assert!(graph.child_nodes("A").is_empty());
}

// ==================== Orphan Tests ====================

#[test]
fn test_orphans_exclude_people_with_parents() {
    let graph = GraphBuilder::new()
        .people(&["C", "D", "P"])
        .parent_of("P", "D")
        .build()
        .unwrap();
    let orphans: Vec<&str> = graph.orphans().iter().map(|n| n.name()).collect();
    assert_eq!(orphans, vec!["C", "P"]);
}

#[test]
fn test_orphans_ignore_incoming_child_edges() {
    // Only an outgoing hasParent edge counts as having a parent.
    let mut graph = people(&["P", "K"]);
    graph.add_edge("P", "K", Relation::Child).unwrap();
    let orphans: Vec<&str> = graph.orphans().iter().map(|n| n.name()).collect();
    assert_eq!(orphans, vec!["P", "K"]);
}

// ==================== Dump Tests ====================

#[test]
fn test_dump_format() {
    let graph = GraphBuilder::new()
        .people(&["Alice", "Bob"])
        .parent_of("Alice", "Bob")
        .friends("Alice", "Bob")
        .build()
        .unwrap();
    let expected = "\
Alice
    hasChild: Bob
    hasFriend: Bob
Bob
    hasParent: Alice
    hasFriend: Alice
";
    assert_eq!(graph.dump(), expected);
    assert_eq!(graph.to_string(), expected);
}

#[test]
fn test_describe_single_node() {
    let graph = GraphBuilder::new()
        .people(&["A", "B"])
        .spouses("A", "B")
        .build()
        .unwrap();
    let b = graph.get_node("B").unwrap();
    assert_eq!(graph.describe(b), "B\n    hasSpouse: A\n");
}
