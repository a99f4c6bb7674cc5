//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::directives::DirectiveKind;

/// Top-level CLI parser for `pml`.
#[derive(Debug, Parser)]
#[command(name = "pml", version, about = "Process PML directives")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a prompt to the language model (`:ask`).
    Ask {
        /// Prompt text.
        prompt: String,
        /// Model identifier; defaults to `PML_MODEL` or the built-in default.
        #[arg(long)]
        model: Option<String>,
        /// Ask for a summary of the text in under five words instead.
        #[arg(long)]
        summarize: bool,
    },
    /// Run a shell action (`:do`).
    Do {
        /// Command line passed to the shell.
        action: String,
        /// Directory to run in; created if missing.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Run a directive selected by name, e.g. `:ask` or `:do`.
    Exec {
        /// Directive name.
        #[arg(value_parser = parse_directive)]
        directive: DirectiveKind,
        /// Directive body: the prompt or the action.
        body: String,
        /// Working directory for `:do`.
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Model for `:ask`.
        #[arg(long)]
        model: Option<String>,
    },
    /// List the known directives.
    List,
}

fn parse_directive(s: &str) -> Result<DirectiveKind, String> {
    s.parse()
}
