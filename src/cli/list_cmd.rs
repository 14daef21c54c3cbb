//! List CLI commands

use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;

use super::output::Output;
use super::task_cmd::open_store;
use crate::domain::ListId;
use crate::view;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Create a new list
    Add {
        /// List name
        name: String,
    },

    /// Rename a list
    Rename {
        /// List ID
        id: String,

        /// New name
        name: String,
    },

    /// Delete a list and all its tasks
    Rm {
        /// List ID
        id: String,
    },
}

pub fn run(cmd: ListCommands, output: &Output, data_path: &Path) -> Result<()> {
    match cmd {
        ListCommands::Add { name } => add(output, data_path, &name),
        ListCommands::Rename { id, name } => rename(output, data_path, &id, &name),
        ListCommands::Rm { id } => remove(output, data_path, &id),
    }
}

/// `td lists`: the list grid, most recently created first
pub fn show_all(output: &Output, data_path: &Path) -> Result<()> {
    let store = open_store(data_path)?;
    let rows = view::project_lists(store.snapshot());

    if output.is_json() {
        output.data(&rows);
        return Ok(());
    }

    for row in &rows {
        output.line(&format!("{}  {} ({} tasks)", row.id, row.name, row.task_count));
    }
    Ok(())
}

fn add(output: &Output, data_path: &Path, name: &str) -> Result<()> {
    let mut store = open_store(data_path)?;
    let Some(list) = store.add_list(name)? else {
        bail!("list name cannot be empty");
    };

    output.success(&format!("Created list {} ({})", list.id, list.name));
    Ok(())
}

fn rename(output: &Output, data_path: &Path, id: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("list name cannot be empty");
    }

    let mut store = open_store(data_path)?;
    if !store.rename_list(&ListId::from_raw(id), name)? {
        bail!("no list with id '{}'", id);
    }

    output.success(&format!("Renamed {} to {}", id, name.trim()));
    Ok(())
}

fn remove(output: &Output, data_path: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_path)?;
    if !store.delete_list(&ListId::from_raw(id))? {
        bail!("no list with id '{}'", id);
    }

    output.success(&format!("Deleted list {}", id));
    Ok(())
}
