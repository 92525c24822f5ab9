//! All data types for the kinship-graph library.

pub mod edge;
pub mod error;
pub mod node;

pub use edge::{GraphEdge, Relation};
pub use error::{GraphError, GraphResult};
pub use node::{GraphNode, NodeId};

/// Key that starts a new person record in relationship files.
pub const NAME_KEY: &str = "name";
