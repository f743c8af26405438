//! mdtasks - inspect tasks declared in markdown

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = mdtasks::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
