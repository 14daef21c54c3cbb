//! Task CLI commands

use std::path::Path;

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::domain::{ListId, Priority, TaskId, TodoList};
use crate::storage::{JsonFile, Prefs, Store};
use crate::view::{self, Filter, TaskRow};

pub(super) fn open_store(data_path: &Path) -> Result<Store<JsonFile>> {
    Store::open(JsonFile::new(data_path)).context("failed to open the collection")
}

/// Resolves the target list: explicit id, or the head list
fn resolve_list<'a>(
    store: &'a Store<JsonFile>,
    list: Option<&str>,
) -> Result<&'a TodoList> {
    match list {
        Some(raw) => store
            .snapshot()
            .find_list(&ListId::from_raw(raw))
            .with_context(|| format!("no list with id '{}'", raw)),
        None => store
            .snapshot()
            .lists
            .first()
            .context("the collection has no lists"),
    }
}

pub fn add(
    output: &Output,
    data_path: &Path,
    text: &str,
    priority: Option<&str>,
    list: Option<&str>,
) -> Result<()> {
    if text.trim().is_empty() {
        bail!("task text cannot be empty");
    }

    let priority = priority
        .map(|p| p.parse::<Priority>().map_err(anyhow::Error::msg))
        .transpose()?
        .unwrap_or_default();

    let mut store = open_store(data_path)?;
    let list_id = resolve_list(&store, list)?.id.clone();

    let task = store
        .add_task(&list_id, text, priority)?
        .with_context(|| format!("no list with id '{}'", list_id))?;

    if output.is_json() {
        output.data(&TaskRow::from(&task));
    } else {
        output.success(&format!("Added {} ({})", task.id, task.text));
    }
    Ok(())
}

pub fn show(
    output: &Output,
    data_path: &Path,
    list: Option<&str>,
    filter: Option<&str>,
) -> Result<()> {
    let store = open_store(data_path)?;

    let filter = match filter {
        Some(raw) => raw.parse::<Filter>().map_err(anyhow::Error::msg)?,
        None => Prefs::load(&Prefs::path_beside(data_path)).filter,
    };
    output.verbose(&format!("filter: {}", filter));

    let list = resolve_list(&store, list)?;
    let rows = view::project_tasks(list, filter);

    if output.is_json() {
        output.data(&rows);
        return Ok(());
    }

    output.line(&format!("{} ({} shown)", list.name, rows.len()));
    for row in &rows {
        let mark = if row.done { "x" } else { " " };
        output.line(&format!(
            "[{}] {}  ({})  {}",
            mark, row.id, row.priority, row.text
        ));
    }
    Ok(())
}

pub fn toggle(output: &Output, data_path: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_path)?;
    let task_id = TaskId::from_raw(id);

    if !store.toggle_done(&task_id)? {
        bail!("no task with id '{}'", id);
    }

    let state = store
        .snapshot()
        .find_task(&task_id)
        .map(|(_, t)| if t.done { "done" } else { "open" })
        .unwrap_or("updated");
    output.success(&format!("{} is now {}", id, state));
    Ok(())
}

pub fn edit(output: &Output, data_path: &Path, id: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("task text cannot be empty");
    }

    let mut store = open_store(data_path)?;
    if !store.edit_text(&TaskId::from_raw(id), text)? {
        bail!("no task with id '{}'", id);
    }

    output.success(&format!("Updated {}", id));
    Ok(())
}

pub fn set_priority(output: &Output, data_path: &Path, id: &str, level: &str) -> Result<()> {
    let priority = level.parse::<Priority>().map_err(anyhow::Error::msg)?;

    let mut store = open_store(data_path)?;
    if !store.set_priority(&TaskId::from_raw(id), priority)? {
        bail!("no task with id '{}'", id);
    }

    output.success(&format!("{} priority set to {}", id, priority));
    Ok(())
}

pub fn remove(output: &Output, data_path: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_path)?;
    if !store.delete_task(&TaskId::from_raw(id))? {
        bail!("no task with id '{}'", id);
    }

    output.success(&format!("Deleted {}", id));
    Ok(())
}
