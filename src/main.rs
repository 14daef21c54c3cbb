//! taskdeck - local-first todo lists with schema-tolerant storage

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskdeck::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
