//! Command dispatcher: one-shot commands and the interactive shell.

pub mod commands;
pub mod repl;
pub mod repl_commands;
pub mod repl_complete;
