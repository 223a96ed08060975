use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task, optionally scheduled at a time
    ///
    /// Example: taskline add "Buy milk"
    /// Example: taskline add "Standup" "2026-01-05 09:30"
    Add {
        description: String,
        time: Option<String>,
    },
    /// List all tasks with their positions
    ///
    /// Example: taskline list
    List,
    /// Delete the task at a 1-based position
    ///
    /// Example: taskline delete 2
    Delete { position: String },
    /// Scan for due tasks and send reminders
    ///
    /// Example: taskline remind
    Remind,
}
