//! Interactive shell for kin.
//!
//! Launch with `kin` (no subcommand) or `kin repl [file]`.
//! Type `help` for available commands, Tab for completion.

use std::path::Path;

use log::debug;
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

use crate::cli::repl_commands::{self, ReplState};
use crate::cli::repl_complete::{self, KinHelper};
use crate::config::KinConfig;
use crate::types::{GraphError, GraphResult};

/// Print the welcome banner.
fn print_banner() {
    eprintln!();
    eprintln!(
        "  \x1b[1mkin v{}\x1b[0m \x1b[90m- relationship graph shell\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("    Type \x1b[36mhelp\x1b[0m for commands, \x1b[90mTab\x1b[0m to complete, \x1b[90mexit\x1b[0m to quit.");
    eprintln!();
}

fn readline_err(e: ReadlineError) -> GraphError {
    GraphError::Readline(e.to_string())
}

/// Run the interactive shell, optionally reading `file` first.
pub fn run(config: &KinConfig, file: Option<&Path>) -> GraphResult<()> {
    print_banner();

    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<KinHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(rl_config).map_err(readline_err)?;
    rl.set_helper(Some(KinHelper::new()));
    repl_complete::bind_keys(&mut rl);

    let hist_path = &config.history_file;
    if hist_path.exists() {
        if let Err(e) = rl.load_history(hist_path) {
            debug!("Could not load history {}: {e}", hist_path.display());
        }
    }

    let mut state = ReplState::new(config.relation_policy(), config.json_output());
    let mut stdout = std::io::stdout();

    if let Some(file) = file {
        let line = format!("read {}", file.display());
        repl_commands::execute(&line, &mut state, &mut stdout)?;
        refresh_people(&mut rl, &state);
    }

    let prompt = "\x1b[36mEnter a command:\x1b[0m ";
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match repl_commands::execute(line, &mut state, &mut stdout) {
                    Ok(true) => break,
                    Ok(false) => refresh_people(&mut rl, &state),
                    Err(e) => eprintln!("  Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1mexit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    if let Some(parent) = hist_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = rl.save_history(hist_path) {
        debug!("Could not save history {}: {e}", hist_path.display());
    }

    Ok(())
}

fn refresh_people(rl: &mut Editor<KinHelper, rustyline::history::DefaultHistory>, state: &ReplState) {
    if let Some(helper) = rl.helper_mut() {
        helper.set_people(state.people());
    }
}
