//! Tab completion for the kin interactive shell.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Event, EventContext, EventHandler, Helper, KeyEvent, RepeatCount,
};

/// All shell commands with a short description.
pub const COMMANDS: &[(&str, &str)] = &[
    ("read", "Read a relationship file: read <file>"),
    ("show", "Show a person's relationships: show <name>"),
    ("friends", "List a person's friends: friends <name>"),
    ("orphans", "List people with no recorded parent"),
    ("descendants", "List descendants by generation: descendants <name>"),
    ("dump", "Print the whole graph"),
    ("clear", "Clear the screen"),
    ("help", "Show available commands"),
    ("exit", "Quit the shell"),
];

/// Commands whose argument is a person's name.
const PERSON_COMMANDS: &[&str] = &["show", "friends", "descendants"];

/// Shell helper providing tab completion and inline hints.
#[derive(Debug, Default)]
pub struct KinHelper {
    people: Vec<String>,
}

impl KinHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the person names offered for completion.
    pub fn set_people(&mut self, mut people: Vec<String>) {
        people.sort();
        self.people = people;
    }

    /// Candidates for the word at the end of `input`.
    pub fn candidates(&self, input: &str) -> (usize, Vec<Pair>) {
        let trimmed = input.trim_start();
        let offset = input.len() - trimmed.len();
        let (slash, body) = match trimmed.strip_prefix('/') {
            Some(rest) => ("/", rest),
            None => ("", trimmed),
        };

        let Some((cmd, args)) = body.split_once(' ') else {
            let matches = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(body))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<14} {desc}"),
                    replacement: format!("{slash}{cmd} "),
                })
                .collect();
            return (offset, matches);
        };

        let start = input.len() - args.len();
        if PERSON_COMMANDS.contains(&cmd) {
            let matches = self
                .people
                .iter()
                .filter(|p| p.starts_with(args))
                .map(|p| Pair {
                    display: p.clone(),
                    replacement: p.clone(),
                })
                .collect();
            return (start, matches);
        }
        if cmd == "read" {
            return (start, relationship_files(args));
        }
        (input.len(), Vec::new())
    }
}

/// Files in the current directory whose names start with `prefix`.
fn relationship_files(prefix: &str) -> Vec<Pair> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(".") {
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if name.starts_with(prefix) {
                    files.push(Pair {
                        display: name.to_string(),
                        replacement: name.to_string(),
                    });
                }
            }
        }
    }
    files.sort_by(|a, b| a.display.cmp(&b.display));
    files
}

impl Completer for KinHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Hinter for KinHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() || line.contains(' ') {
            return None;
        }
        let word = line.strip_prefix('/').unwrap_or(line);
        COMMANDS
            .iter()
            .find(|(cmd, _)| cmd.starts_with(word) && *cmd != word)
            .map(|(cmd, _)| cmd[word.len()..].to_string())
    }
}

impl Highlighter for KinHelper {}
impl Validator for KinHelper {}
impl Helper for KinHelper {}

/// Tab accepts hint if present, else triggers completion.
pub struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Bind custom key sequences.
pub fn bind_keys(rl: &mut rustyline::Editor<KinHelper, rustyline::history::DefaultHistory>) {
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );
}

/// Find closest matching command (Levenshtein).
pub fn suggest_command(input: &str) -> Option<&'static str> {
    let input_lower = input.to_lowercase();
    let mut best: Option<(&'static str, usize)> = None;

    for &(cmd, _) in COMMANDS {
        let dist = levenshtein(&input_lower, cmd);
        if dist <= 3 && best.map_or(true, |(_, d)| dist < d) {
            best = Some((cmd, dist));
        }
    }

    best.map(|(cmd, _)| cmd)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|p| p.replacement.as_str()).collect()
    }

    #[test]
    fn completes_command_names() {
        let helper = KinHelper::new();
        let (start, pairs) = helper.candidates("de");
        assert_eq!(start, 0);
        assert_eq!(replacements(&pairs), vec!["descendants "]);

        let (_, pairs) = helper.candidates("/fr");
        assert_eq!(replacements(&pairs), vec!["/friends "]);
    }

    #[test]
    fn completes_person_names_for_person_commands() {
        let mut helper = KinHelper::new();
        helper.set_people(vec!["Bob".into(), "Alice".into(), "Bea".into()]);
        let (start, pairs) = helper.candidates("show B");
        assert_eq!(start, 5);
        assert_eq!(replacements(&pairs), vec!["Bea", "Bob"]);

        let (_, pairs) = helper.candidates("orphans B");
        assert!(pairs.is_empty());
    }

    #[test]
    fn suggests_close_commands() {
        assert_eq!(suggest_command("dmp"), Some("dump"));
        assert_eq!(suggest_command("frends"), Some("friends"));
        assert_eq!(suggest_command("xyzzyplugh"), None);
    }
}
