//! In-memory graph operations: the core data structure.

pub mod builder;
pub mod relationship_graph;
pub mod traversal;

pub use builder::GraphBuilder;
pub use relationship_graph::RelationshipGraph;
pub use traversal::{
    descendants, generation_label, DescendantOutcome, Generations, VisitSet, VisitState,
};
