use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::Context;

#[derive(Parser)]
#[command(name = "wt", about = concat!("wt v", env!("CARGO_PKG_VERSION"), " - work and travel todos"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and a commented config.toml
    Init(InitArgs),
    /// List todos in the current context
    List(ListArgs),
    /// Show or switch the current context
    Context(ContextArgs),
    /// Add a todo to the current context
    Add(AddArgs),
    /// Mark a todo complete, or not complete again
    Toggle(KeyArgs),
    /// Change a todo's text
    Edit(EditArgs),
    /// Delete a todo (asks for confirmation)
    Delete(DeleteArgs),
    /// Show the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// List this context instead of the current one
    #[arg(long)]
    pub context: Option<Context>,
    /// List both contexts
    #[arg(long, conflicts_with = "context")]
    pub all: bool,
}

#[derive(Args)]
pub struct ContextArgs {
    /// Context to switch to (work or travel); omit to show the current one
    pub context: Option<Context>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text
    pub text: String,
}

#[derive(Args)]
pub struct KeyArgs {
    /// Todo key (as shown by `wt list`)
    pub key: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo key
    pub key: String,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Todo key
    pub key: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Show only the newest N entries
    #[arg(long)]
    pub tail: Option<usize>,
}
