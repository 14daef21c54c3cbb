//! Import/export and saved-preference commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use super::output::Output;
use super::task_cmd::open_store;
use crate::storage::Prefs;
use crate::view::Filter;

/// Replaces the collection with the contents of a JSON file.
///
/// Undecodable JSON is treated like a missing document and imports as an
/// empty collection, with a warning; the normalizer absorbs every other
/// shape. Replace-not-merge is the import contract.
pub fn import(output: &Output, data_path: &Path, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let raw = match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(err) => {
            output.warn(&format!(
                "{} is not valid JSON ({}); importing an empty collection",
                file.display(),
                err
            ));
            Value::Null
        }
    };

    let mut store = open_store(data_path)?;
    store.import(&raw)?;

    let snapshot = store.snapshot();
    output.success(&format!(
        "Imported {} lists with {} tasks",
        snapshot.lists.len(),
        snapshot.task_count()
    ));
    Ok(())
}

/// Writes the collection as pretty-printed JSON, to a file or stdout
pub fn export(output: &Output, data_path: &Path, target: Option<&Path>) -> Result<()> {
    let store = open_store(data_path)?;
    let json = store.export_json()?;

    match target {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            output.success(&format!("Exported to {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Persists the shell's default task filter
pub fn set_filter(output: &Output, data_path: &Path, value: &str) -> Result<()> {
    let filter = value.parse::<Filter>().map_err(anyhow::Error::msg)?;

    let path = Prefs::path_beside(data_path);
    let mut prefs = Prefs::load(&path);
    prefs.filter = filter;
    prefs.save(&path)?;

    output.success(&format!("Filter set to {}", filter));
    Ok(())
}

/// Persists the shell's theme choice
pub fn set_theme(output: &Output, data_path: &Path, value: &str) -> Result<()> {
    let theme = value
        .parse::<crate::storage::Theme>()
        .map_err(anyhow::Error::msg)?;

    let path = Prefs::path_beside(data_path);
    let mut prefs = Prefs::load(&path);
    prefs.theme = theme;
    prefs.save(&path)?;

    output.success(&format!("Theme set to {}", theme.as_str()));
    Ok(())
}
