//! kinship-graph: a directed, labeled graph of people and their relationships.
//!
//! People are nodes; relationships (`hasParent`, `hasChild`, `hasSpouse`,
//! `hasFriend`, or any other label) are directed edges. The graph answers
//! lookups, orphan scans and generation-grouped descendant queries with
//! cycle detection.

pub mod cli;
pub mod config;
pub mod engine;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::KinConfig;
pub use engine::{
    parse_records, DescendantQuery, GenerationView, IngestEngine, IngestReport, IngestWarning,
    PersonView, QueryEngine, Record, RelationPolicy,
};
pub use graph::{
    descendants, generation_label, DescendantOutcome, GraphBuilder, Generations,
    RelationshipGraph, VisitSet, VisitState,
};
pub use types::{GraphEdge, GraphError, GraphNode, GraphResult, NodeId, Relation};
