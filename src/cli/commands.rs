//! CLI command implementations.
//!
//! Every command renders into a `Write` sink, as text or JSON. Lookups of
//! unknown people return [`GraphError::NotFound`] after nothing has been
//! written, so callers decide how to report them.

use std::io::Write;
use std::path::Path;

use crate::engine::{DescendantQuery, IngestEngine, IngestReport, QueryEngine, RelationPolicy};
use crate::graph::RelationshipGraph;
use crate::types::{GraphError, GraphResult};

/// Read a relationship file into a new graph.
pub fn cmd_read(
    out: &mut dyn Write,
    path: &Path,
    policy: &RelationPolicy,
    json: bool,
) -> GraphResult<RelationshipGraph> {
    let engine = IngestEngine::new(policy.clone());
    let (graph, report) = engine.load_file(path)?;
    if json {
        write_report_json(out, path, &report)?;
    } else {
        writeln!(out, "Reading file {}", path.display())?;
        writeln!(out, "{} people read", report.people)?;
    }
    Ok(graph)
}

/// Ingest a relationship file and print the full report, warnings included.
pub fn cmd_check(
    out: &mut dyn Write,
    path: &Path,
    policy: &RelationPolicy,
    json: bool,
) -> GraphResult<IngestReport> {
    let engine = IngestEngine::new(policy.clone());
    let (_, report) = engine.load_file(path)?;
    if json {
        write_report_json(out, path, &report)?;
    } else {
        writeln!(out, "File: {}", path.display())?;
        writeln!(out, "People: {}", report.people)?;
        writeln!(out, "Edges: {}", report.edges)?;
        writeln!(out, "Warnings: {}", report.warnings.len())?;
        for warning in &report.warnings {
            writeln!(out, "  {warning}")?;
        }
    }
    Ok(report)
}

fn write_report_json(out: &mut dyn Write, path: &Path, report: &IngestReport) -> GraphResult<()> {
    let info = serde_json::json!({
        "file": path.display().to_string(),
        "people": report.people,
        "edges": report.edges,
        "warnings": report.warnings,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
    Ok(())
}

/// Show the relationships a person is involved in.
pub fn cmd_show(
    out: &mut dyn Write,
    graph: &RelationshipGraph,
    name: &str,
    json: bool,
) -> GraphResult<()> {
    if json {
        let view = QueryEngine::new()
            .person(graph, name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))?;
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        let node = graph
            .get_node(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))?;
        write!(out, "{}", graph.describe(node))?;
    }
    Ok(())
}

/// Show a person's friends.
pub fn cmd_friends(
    out: &mut dyn Write,
    graph: &RelationshipGraph,
    name: &str,
    json: bool,
) -> GraphResult<()> {
    let friends = QueryEngine::new()
        .friends(graph, name)
        .ok_or_else(|| GraphError::NotFound(name.to_string()))?;
    if json {
        let info = serde_json::json!({ "name": name, "friends": friends });
        writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
    } else {
        writeln!(out, "{}'s friends: {}", name, friends.join(" "))?;
    }
    Ok(())
}

/// Show everyone with no recorded parent.
pub fn cmd_orphans(out: &mut dyn Write, graph: &RelationshipGraph, json: bool) -> GraphResult<()> {
    let orphans = QueryEngine::new().orphans(graph);
    if json {
        let info = serde_json::json!({ "orphans": orphans });
        writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
    } else {
        writeln!(out, "{}", orphans.join(" "))?;
    }
    Ok(())
}

/// Show a person's descendants, one line per generation.
///
/// A `hasChild` cycle is returned as [`GraphError::CycleDetected`] without
/// printing any generation.
pub fn cmd_descendants(
    out: &mut dyn Write,
    engine: &mut QueryEngine,
    graph: &RelationshipGraph,
    name: &str,
    json: bool,
) -> GraphResult<()> {
    let result = engine.descendants(graph, name)?;
    if let DescendantQuery::UnknownPerson = result {
        return Err(GraphError::NotFound(name.to_string()));
    }

    if json {
        let info = serde_json::json!({ "name": name, "descendants": result });
        writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
        return Ok(());
    }

    match result {
        DescendantQuery::Found(generations) => {
            for generation in generations {
                writeln!(
                    out,
                    "{}: {}",
                    capitalize(&generation.label),
                    generation.people.join(" ")
                )?;
            }
        }
        _ => writeln!(out, "{name} has no descendants")?,
    }
    Ok(())
}

/// Print every person and their relationships.
pub fn cmd_dump(out: &mut dyn Write, graph: &RelationshipGraph, json: bool) -> GraphResult<()> {
    if json {
        let engine = QueryEngine::new();
        let people: Vec<_> = graph
            .nodes()
            .iter()
            .filter_map(|n| engine.person(graph, n.name()))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&people)?)?;
    } else {
        write!(out, "{}", graph.dump())?;
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("great grandchildren"), "Great grandchildren");
        assert_eq!(capitalize(""), "");
    }
}
