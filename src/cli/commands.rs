use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::ops::filter::FilterMode;

#[derive(Parser)]
#[command(name = "tareas", about = concat!("tareas v", env!("CARGO_PKG_VERSION"), " - a categorized to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding tasks.json and config.toml
    #[arg(long = "data-dir", env = "TAREAS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Change a task's text or category
    Edit(EditArgs),
    /// Mark a task completed, or pending again
    Toggle(TaskArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// List the categories
    Categories,
    /// Print the path of the task document
    Path,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (all, pending, completed)
    #[arg(long, default_value = "all")]
    pub filter: FilterMode,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Category name (default: the first category)
    #[arg(long, short)]
    pub category: Option<String>,
}

/// A task reference: 1-based position as shown by `list`, or an id prefix
#[derive(Args)]
pub struct TaskArgs {
    /// Position in `list` (1-based) or id prefix
    pub task: String,
    /// Resolve positions against this filter, as `list --filter` shows them
    #[arg(long, default_value = "all")]
    pub filter: FilterMode,
}

#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: TaskArgs,
    /// New text
    #[arg(long)]
    pub text: Option<String>,
    /// New category name
    #[arg(long, short)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: TaskArgs,
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}
