//! High-level operations: ingest engine and query engine.

pub mod ingest;
pub mod query;

pub use ingest::{
    parse_records, IngestEngine, IngestReport, IngestWarning, ParsedRecord, Record, RelationPolicy,
};
pub use query::{DescendantQuery, GenerationView, PersonView, QueryEngine, RelationView};
