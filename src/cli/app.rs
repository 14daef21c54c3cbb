//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{list_cmd, task_cmd, transfer};
use crate::storage;

#[derive(Parser)]
#[command(name = "td")]
#[command(author, version, about = "Local-first todo lists with schema-tolerant storage")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the collection file (defaults to the platform data dir)
    #[arg(long, global = true, env = "TD_FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text
        text: String,

        /// Priority (low, normal, high)
        #[arg(long, short)]
        priority: Option<String>,

        /// List to add to (defaults to the first list)
        #[arg(long)]
        list: Option<String>,
    },

    /// Show tasks
    Tasks {
        /// List to show (defaults to the first list)
        #[arg(long)]
        list: Option<String>,

        /// Filter (all, active, completed); defaults to the saved preference
        #[arg(long)]
        filter: Option<String>,
    },

    /// Toggle a task's done flag
    Done {
        /// Task ID
        id: String,
    },

    /// Edit a task's text
    Edit {
        /// Task ID
        id: String,

        /// New text
        text: String,
    },

    /// Change a task's priority
    Priority {
        /// Task ID
        id: String,

        /// New priority (low, normal, high)
        level: String,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: String,
    },

    /// Show all lists
    Lists,

    /// Manage lists
    #[command(subcommand)]
    List(list_cmd::ListCommands),

    /// Import a collection from a JSON file, replacing the current one
    Import {
        /// File to import
        path: PathBuf,
    },

    /// Export the collection as pretty-printed JSON
    Export {
        /// Destination file (stdout when omitted)
        path: Option<PathBuf>,
    },

    /// Set the saved task filter (all, active, completed)
    Filter {
        /// Filter value
        value: String,
    },

    /// Set the saved theme (light, dark)
    Theme {
        /// Theme value
        value: String,
    },
}

/// Parses arguments and executes the chosen command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let data_path = cli.file.unwrap_or_else(storage::default_data_path);
    output.verbose(&format!("collection file: {}", data_path.display()));

    match cli.command {
        Commands::Add {
            text,
            priority,
            list,
        } => task_cmd::add(&output, &data_path, &text, priority.as_deref(), list.as_deref()),
        Commands::Tasks { list, filter } => {
            task_cmd::show(&output, &data_path, list.as_deref(), filter.as_deref())
        }
        Commands::Done { id } => task_cmd::toggle(&output, &data_path, &id),
        Commands::Edit { id, text } => task_cmd::edit(&output, &data_path, &id, &text),
        Commands::Priority { id, level } => {
            task_cmd::set_priority(&output, &data_path, &id, &level)
        }
        Commands::Rm { id } => task_cmd::remove(&output, &data_path, &id),
        Commands::Lists => list_cmd::show_all(&output, &data_path),
        Commands::List(cmd) => list_cmd::run(cmd, &output, &data_path),
        Commands::Import { path } => transfer::import(&output, &data_path, &path),
        Commands::Export { path } => transfer::export(&output, &data_path, path.as_deref()),
        Commands::Filter { value } => transfer::set_filter(&output, &data_path, &value),
        Commands::Theme { value } => transfer::set_theme(&output, &data_path, &value),
    }
}
