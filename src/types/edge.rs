//! Relation labels and the core edge struct.

use serde::{Serialize, Serializer};

use super::NodeId;

/// The label of a directed relationship between two people.
///
/// The vocabulary is open: the four labels the ingestion policy knows about
/// get their own variants, anything else is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `hasParent`: the target is a parent of the source.
    Parent,
    /// `hasChild`: the target is a child of the source.
    Child,
    /// `hasSpouse`.
    Spouse,
    /// `hasFriend`.
    Friend,
    /// Any other relation token found in the input.
    Other(String),
}

impl Relation {
    /// Return the label as it appears in relationship files.
    pub fn name(&self) -> &str {
        match self {
            Self::Parent => "hasParent",
            Self::Child => "hasChild",
            Self::Spouse => "hasSpouse",
            Self::Friend => "hasFriend",
            Self::Other(label) => label,
        }
    }

    /// Parse a relation label. Known labels are matched case-sensitively.
    pub fn from_name(name: &str) -> Self {
        match name {
            "hasParent" => Self::Parent,
            "hasChild" => Self::Child,
            "hasSpouse" => Self::Spouse,
            "hasFriend" => Self::Friend,
            other => Self::Other(other.to_string()),
        }
    }

    /// True for the four labels with dedicated variants.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Relation {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A directed, labeled relationship between two people.
///
/// Endpoints are arena indices into the owning graph; an edge never owns
/// the nodes it connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Node whose outgoing list holds this edge.
    pub from: NodeId,
    /// Node the relationship points at.
    pub to: NodeId,
    /// Relationship label.
    pub relation: Relation,
}

impl GraphEdge {
    /// Create a new edge.
    pub fn new(from: NodeId, to: NodeId, relation: Relation) -> Self {
        Self { from, to, relation }
    }
}
