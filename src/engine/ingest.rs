//! Relationship-file ingestion: parser and the ingest engine.
//!
//! A relationship file is a sequence of `key: value` records separated by
//! `;` or line breaks (`\n`, `\r\n` or a bare `\r`). `name: X` starts a new
//! person; any other key is a relation label from the current person to the
//! value:
//!
//! ```text
//! name: Alice; hasChild: Bob; hasSpouse: Dan
//! name: Bob
//! hasFriend: Carol
//! ```

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::graph::RelationshipGraph;
use crate::types::{GraphResult, Relation, NAME_KEY};

/// Records shorter than this (after trimming) are ignored.
const MIN_RECORD_LEN: usize = 3;

/// One parsed record of a relationship file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `name: X`, the start of a person.
    Person(String),
    /// `relation: target` for the current person.
    Relation { relation: Relation, target: String },
    /// Text that is not a `key: value` pair.
    Malformed(String),
}

/// A record and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub line: usize,
    pub record: Record,
}

/// Split relationship-file text into records.
pub fn parse_records(input: &str) -> Vec<ParsedRecord> {
    let mut records = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        for item in line.split(|c| c == ';' || c == '\r') {
            let item = item.trim();
            if item.len() < MIN_RECORD_LEN {
                continue;
            }
            records.push(ParsedRecord {
                line: idx + 1,
                record: parse_item(item),
            });
        }
    }
    records
}

fn parse_item(item: &str) -> Record {
    let Some((key, value)) = item.split_once(':') else {
        return Record::Malformed(item.to_string());
    };
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Record::Malformed(item.to_string());
    }
    if key == NAME_KEY {
        Record::Person(value.to_string())
    } else {
        Record::Relation {
            relation: Relation::from_name(key),
            target: value.to_string(),
        }
    }
}

/// Which mirror edge, if any, accompanies each relation on ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationPolicy {
    mirrors: HashMap<Relation, Relation>,
}

impl Default for RelationPolicy {
    /// `hasParent` and `hasChild` are inverses; `hasSpouse` and `hasFriend`
    /// are symmetric.
    fn default() -> Self {
        Self::empty()
            .with_inverse(Relation::Parent, Relation::Child)
            .with_symmetric(Relation::Spouse)
            .with_symmetric(Relation::Friend)
    }
}

impl RelationPolicy {
    /// A policy that never mirrors.
    pub fn empty() -> Self {
        Self {
            mirrors: HashMap::new(),
        }
    }

    /// Mirror `relation` with itself.
    pub fn with_symmetric(mut self, relation: Relation) -> Self {
        self.mirrors.insert(relation.clone(), relation);
        self
    }

    /// Mirror `a` with `b` and `b` with `a`.
    pub fn with_inverse(mut self, a: Relation, b: Relation) -> Self {
        self.mirrors.insert(a.clone(), b.clone());
        self.mirrors.insert(b, a);
        self
    }

    /// The relation to add from target back to source, if any.
    pub fn mirror_of(&self, relation: &Relation) -> Option<&Relation> {
        self.mirrors.get(relation)
    }
}

/// A record that was skipped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestWarning {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Result of an ingest operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Number of people added.
    pub people: usize,
    /// Number of edges added, mirrors included.
    pub edges: usize,
    /// Records that could not be applied.
    pub warnings: Vec<IngestWarning>,
}

impl IngestReport {
    fn skip(&mut self, line: usize, message: impl Into<String>) {
        let warning = IngestWarning {
            line,
            message: message.into(),
        };
        warn!("Skipping record at {}", warning);
        self.warnings.push(warning);
    }
}

/// Applies parsed records to a graph, adding mirror edges per its policy.
#[derive(Debug, Clone, Default)]
pub struct IngestEngine {
    policy: RelationPolicy,
}

impl IngestEngine {
    /// Create an ingest engine with the given mirror policy.
    pub fn new(policy: RelationPolicy) -> Self {
        Self { policy }
    }

    /// The mirror policy in use.
    pub fn policy(&self) -> &RelationPolicy {
        &self.policy
    }

    /// Read a relationship file and ingest it into `graph`.
    /// Only an unreadable file is an error; bad records become warnings.
    pub fn ingest_file(
        &self,
        graph: &mut RelationshipGraph,
        path: &Path,
    ) -> GraphResult<IngestReport> {
        let input = std::fs::read_to_string(path)?;
        debug!("Read {} bytes from {}", input.len(), path.display());
        Ok(self.ingest_str(graph, &input))
    }

    /// Build a fresh graph from a relationship file.
    pub fn load_file(&self, path: &Path) -> GraphResult<(RelationshipGraph, IngestReport)> {
        let mut graph = RelationshipGraph::new();
        let report = self.ingest_file(&mut graph, path)?;
        Ok((graph, report))
    }

    /// Parse and ingest relationship-file text.
    pub fn ingest_str(&self, graph: &mut RelationshipGraph, input: &str) -> IngestReport {
        self.ingest_records(graph, &parse_records(input))
    }

    /// Ingest parsed records.
    ///
    /// All people are declared first so relations may refer to people that
    /// appear later in the input. Failed records are reported and skipped.
    pub fn ingest_records(
        &self,
        graph: &mut RelationshipGraph,
        records: &[ParsedRecord],
    ) -> IngestReport {
        let mut report = IngestReport::default();

        for rec in records {
            if let Record::Person(name) = &rec.record {
                match graph.add_node(name) {
                    Ok(_) => report.people += 1,
                    Err(e) => report.skip(rec.line, e.to_string()),
                }
            }
        }

        let mut current: Option<&str> = None;
        for rec in records {
            match &rec.record {
                Record::Person(name) => current = Some(name),
                Record::Malformed(text) => {
                    report.skip(
                        rec.line,
                        format!("expected `key: value`, found {text:?}"),
                    );
                }
                Record::Relation { relation, target } => {
                    let Some(person) = current else {
                        report.skip(
                            rec.line,
                            format!("{relation} before any `name:` record"),
                        );
                        continue;
                    };
                    self.apply_relation(
                        graph,
                        &mut report,
                        rec.line,
                        person,
                        relation,
                        target,
                    );
                }
            }
        }

        debug!(
            "Ingested {} people and {} edges ({} warnings)",
            report.people,
            report.edges,
            report.warnings.len()
        );
        report
    }

    fn apply_relation(
        &self,
        graph: &mut RelationshipGraph,
        report: &mut IngestReport,
        line: usize,
        person: &str,
        relation: &Relation,
        target: &str,
    ) {
        if let Err(e) = graph.add_edge(person, target, relation.clone()) {
            report.skip(line, e.to_string());
            return;
        }
        report.edges += 1;

        if let Some(mirror) = self.policy.mirror_of(relation) {
            match graph.add_edge(target, person, mirror.clone()) {
                Ok(()) => report.edges += 1,
                Err(e) => report.skip(line, e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolons_and_newlines() {
        let records = parse_records("name: A ; hasChild :B\r\nname:B;;  \n x \n");
        let kinds: Vec<&Record> = records.iter().map(|r| &r.record).collect();
        assert_eq!(
            kinds,
            vec![
                &Record::Person("A".into()),
                &Record::Relation {
                    relation: Relation::Child,
                    target: "B".into()
                },
                &Record::Person("B".into()),
            ]
        );
        assert_eq!(records[2].line, 2);
    }

    #[test]
    fn bare_carriage_return_separates_records() {
        let records = parse_records("name: A\rhasFriend: B");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record, Record::Person("A".into()));
    }

    #[test]
    fn missing_colon_is_malformed() {
        let records = parse_records("name Alice\nhasChild:");
        assert_eq!(records[0].record, Record::Malformed("name Alice".into()));
        assert_eq!(records[1].record, Record::Malformed("hasChild:".into()));
    }

    #[test]
    fn default_policy_mirrors_known_relations() {
        let policy = RelationPolicy::default();
        assert_eq!(policy.mirror_of(&Relation::Parent), Some(&Relation::Child));
        assert_eq!(policy.mirror_of(&Relation::Child), Some(&Relation::Parent));
        assert_eq!(policy.mirror_of(&Relation::Spouse), Some(&Relation::Spouse));
        assert_eq!(policy.mirror_of(&Relation::Friend), Some(&Relation::Friend));
        assert_eq!(policy.mirror_of(&Relation::from_name("hasBoss")), None);
    }

    #[test]
    fn relation_before_name_is_skipped() {
        let mut graph = RelationshipGraph::new();
        let report = IngestEngine::default().ingest_str(&mut graph, "hasChild: B\nname: B");
        assert_eq!(report.people, 1);
        assert_eq!(report.edges, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 1);
    }
}
