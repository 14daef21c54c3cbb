//! # Command-Line Interface
//!
//! The replaceable shell around the core: it dispatches mutation commands to
//! the store and renders projected rows. All commands support `--format`
//! (`text` or `json`), `--verbose` for debug output on stderr, and `--file`
//! (or `TD_FILE`) to point at a collection document.
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod list_cmd;
mod output;
mod task_cmd;
mod transfer;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
