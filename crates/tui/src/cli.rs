use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::FilterMode;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tix",
    version,
    about = "A keyboard-first to-do list for your task service.",
    after_help = "Examples:\n  tix                       Launch the TUI (same as `tix tui`)\n  tix list --filter completed\n  tix add Buy milk\n  tix delete 7"
)]
pub struct Cli {
    /// Override the task service base URL (defaults to $TIX_API_URL, then http://localhost:3000/api)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the tracing filter (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    /// Append logs to this file instead of stderr (keeps them readable while the TUI owns the screen)
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Fetch the task collection and print it with counts
    List(ListArgs),
    /// Create a new task from the given text
    Add(AddArgs),
    /// Delete one or more tasks by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Client-side filter over the fetched collection
    #[arg(long, value_enum, default_value_t = FilterMode::All)]
    pub filter: FilterMode,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task text, sent to the service exactly as typed
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more task ids to delete (shown in the TUI's ID column)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}
