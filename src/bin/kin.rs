//! CLI entry point for the `kin` command-line tool.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use kinship_graph::cli::{commands, repl};
use kinship_graph::config::KinConfig;
use kinship_graph::engine::{IngestEngine, QueryEngine};
use kinship_graph::graph::RelationshipGraph;
use kinship_graph::types::{GraphError, GraphResult};

#[derive(Parser)]
#[command(
    name = "kin",
    about = "kin: query a graph of people and their relationships"
)]
struct Cli {
    /// Output format: "text" or "json" (default from config, else text)
    #[arg(long)]
    format: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a kin.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the relationships a person is involved in
    Show {
        /// Path to the relationship file
        file: PathBuf,
        /// Person's name
        name: String,
    },
    /// List a person's friends
    Friends {
        /// Path to the relationship file
        file: PathBuf,
        /// Person's name
        name: String,
    },
    /// List people with no recorded parent
    Orphans {
        /// Path to the relationship file
        file: PathBuf,
    },
    /// List a person's descendants grouped by generation
    Descendants {
        /// Path to the relationship file
        file: PathBuf,
        /// Person's name
        name: String,
    },
    /// Print every person and their relationships
    Dump {
        /// Path to the relationship file
        file: PathBuf,
    },
    /// Ingest a relationship file and report skipped records
    Check {
        /// Path to the relationship file
        file: PathBuf,
    },
    /// Start the interactive shell
    Repl {
        /// Relationship file to read on startup
        file: Option<PathBuf>,
    },
}

fn init_logging(config: &KinConfig, verbose: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    );
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn load(path: &Path, config: &KinConfig) -> GraphResult<RelationshipGraph> {
    let engine = IngestEngine::new(config.relation_policy());
    let (graph, report) = engine.load_file(path)?;
    if !report.warnings.is_empty() {
        log::info!(
            "{} record(s) skipped in {}; run `kin check` for details",
            report.warnings.len(),
            path.display()
        );
    }
    Ok(graph)
}

fn run(cli: Cli, config: KinConfig) -> GraphResult<()> {
    let json = match cli.format.as_deref() {
        Some(format) => format == "json",
        None => config.json_output(),
    };
    let mut stdout = std::io::stdout();
    let out = &mut stdout;

    match cli.command {
        None => repl::run(&config, None),
        Some(Commands::Repl { file }) => repl::run(&config, file.as_deref()),
        Some(Commands::Show { file, name }) => {
            commands::cmd_show(out, &load(&file, &config)?, &name, json)
        }
        Some(Commands::Friends { file, name }) => {
            commands::cmd_friends(out, &load(&file, &config)?, &name, json)
        }
        Some(Commands::Orphans { file }) => {
            commands::cmd_orphans(out, &load(&file, &config)?, json)
        }
        Some(Commands::Descendants { file, name }) => {
            let graph = load(&file, &config)?;
            commands::cmd_descendants(out, &mut QueryEngine::new(), &graph, &name, json)
        }
        Some(Commands::Dump { file }) => commands::cmd_dump(out, &load(&file, &config)?, json),
        Some(Commands::Check { file }) => {
            commands::cmd_check(out, &file, &config.relation_policy(), json).map(|_| ())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match KinConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
    init_logging(&config, cli.verbose);

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::Io(_) => 1,
            GraphError::Config(_) => 2,
            GraphError::NotFound(_) => 3,
            GraphError::CycleDetected { .. } => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
