//! Command dispatch for the kin interactive shell.

use std::io::Write;
use std::path::PathBuf;

use crate::cli::commands;
use crate::cli::repl_complete::{suggest_command, COMMANDS};
use crate::engine::{QueryEngine, RelationPolicy};
use crate::graph::RelationshipGraph;
use crate::types::{GraphError, GraphResult};

/// Session state.
#[derive(Debug, Default)]
pub struct ReplState {
    /// The graph read by the last successful `read`.
    pub graph: RelationshipGraph,
    /// File the graph came from.
    pub file_path: Option<PathBuf>,
    /// Mirror policy applied by `read`.
    pub policy: RelationPolicy,
    /// Emit JSON instead of text.
    pub json: bool,
    engine: QueryEngine,
}

impl ReplState {
    pub fn new(policy: RelationPolicy, json: bool) -> Self {
        Self {
            policy,
            json,
            ..Self::default()
        }
    }

    /// Names of everyone in the loaded graph.
    pub fn people(&self) -> Vec<String> {
        self.graph
            .nodes()
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

/// Execute one shell command. Returns `true` if the shell should exit.
///
/// Unknown people and detected cycles are reported on `out`; only I/O and
/// serialization failures are returned as errors.
pub fn execute(input: &str, state: &mut ReplState, out: &mut dyn Write) -> GraphResult<bool> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input);
    if input.is_empty() {
        return Ok(false);
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    let result = match (cmd, args.is_empty()) {
        ("exit" | "quit", _) => return Ok(true),
        ("help" | "h" | "?", _) => cmd_help(out),
        ("clear" | "cls", _) => write!(out, "\x1b[2J\x1b[H").map_err(GraphError::from),
        ("read", false) => cmd_read(args, state, out),
        ("show", false) => commands::cmd_show(out, &state.graph, args, state.json),
        ("friends", false) => commands::cmd_friends(out, &state.graph, args, state.json),
        ("orphans", _) => commands::cmd_orphans(out, &state.graph, state.json),
        ("descendants", false) => {
            commands::cmd_descendants(out, &mut state.engine, &state.graph, args, state.json)
        }
        ("dump", _) => commands::cmd_dump(out, &state.graph, state.json),
        ("read" | "show" | "friends" | "descendants", true) => {
            writeln!(out, "Usage: {}", usage(cmd)).map_err(GraphError::from)
        }
        _ => cmd_unknown(cmd, out),
    };

    match result {
        Ok(()) => Ok(false),
        Err(e @ GraphError::NotFound(_)) | Err(e @ GraphError::CycleDetected { .. }) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
        Err(GraphError::Io(e)) if cmd == "read" => {
            writeln!(out, "Unable to read file {args}: {e}")?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn usage(cmd: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == cmd)
        .map(|(_, desc)| *desc)
        .unwrap_or("")
}

fn cmd_help(out: &mut dyn Write) -> GraphResult<()> {
    writeln!(out)?;
    writeln!(out, "  Commands:")?;
    writeln!(out)?;
    for (cmd, desc) in COMMANDS {
        writeln!(out, "    {cmd:<14} {desc}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn cmd_unknown(cmd: &str, out: &mut dyn Write) -> GraphResult<()> {
    match suggest_command(cmd) {
        Some(suggestion) => writeln!(out, "Unknown command '{cmd}'. Did you mean {suggestion}?")?,
        None => writeln!(out, "Unknown command '{cmd}'.")?,
    }
    writeln!(
        out,
        "Legal commands: read [filename], dump, show [personname],\n  friends [personname], orphans, descendants [personname], exit"
    )?;
    Ok(())
}

fn cmd_read(args: &str, state: &mut ReplState, out: &mut dyn Write) -> GraphResult<()> {
    let file = PathBuf::from(args);
    state.graph = commands::cmd_read(out, &file, &state.policy, state.json)?;
    state.file_path = Some(file);
    Ok(())
}
