//! Durable medium for the persisted document
//!
//! The whole collection lives in one UTF-8 JSON file. [`Medium`] is the seam
//! the store writes through; [`JsonFile`] is the production implementation
//! with exclusive file locking and atomic temp-file + rename writes, so a
//! crash mid-write never leaves a torn document behind.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Read/write access to the single durable document
pub trait Medium {
    /// Reads the stored document, `None` when nothing was ever persisted
    fn read(&self) -> io::Result<Option<String>>;

    /// Durably replaces the stored document
    fn write(&self, contents: &str) -> io::Result<()>;
}

/// File-backed medium for the collection document
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Medium for JsonFile {
    fn read(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        (&file).read_to_string(&mut contents)?;

        // Lock is released when the file is dropped
        Ok(Some(contents))
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a temp sibling first, then rename into place
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            file.lock_exclusive()?;

            let mut writer = io::BufWriter::new(&file);
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)
    }
}
