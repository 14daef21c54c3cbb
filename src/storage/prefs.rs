//! UI-shell preferences
//!
//! The active filter and theme choice belong to the shell, not the core
//! model, and live apart from the collection document in a small TOML file
//! (`prefs.toml` next to the data file). Unreadable or unparsable
//! preferences fall back to defaults; only writing surfaces an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::Filter;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences")]
    Encode(#[from] toml::ser::Error),
}

/// Display theme, persisted for the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme '{}': expected light or dark", other)),
        }
    }
}

/// Shell preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prefs {
    pub filter: Filter,
    pub theme: Theme,
}

impl Prefs {
    /// Loads preferences, falling back to defaults when missing or malformed
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Writes preferences to disk
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        let encoded = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, encoded).map_err(|source| PrefsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Preferences file sitting next to the collection document
    pub fn path_beside(data_path: &Path) -> PathBuf {
        data_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("prefs.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let prefs = Prefs::load(&dir.path().join("prefs.toml"));
        assert_eq!(prefs.filter, Filter::All);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "filter = 7").unwrap();
        assert_eq!(Prefs::load(&path), Prefs::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");

        let prefs = Prefs {
            filter: Filter::Active,
            theme: Theme::Dark,
        };
        prefs.save(&path).unwrap();

        assert_eq!(Prefs::load(&path), prefs);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "theme = \"dark\"").unwrap();

        let prefs = Prefs::load(&path);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.filter, Filter::All);
    }

    #[test]
    fn path_beside_data_file() {
        let path = Prefs::path_beside(Path::new("/data/taskdeck.json"));
        assert_eq!(path, Path::new("/data/prefs.toml"));
    }
}
