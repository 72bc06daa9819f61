//! Cue - named modes of commands and URLs

use std::process::ExitCode;

fn main() -> ExitCode {
    match cue_cli::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            cue_cli::cli::exit_code_for(&e)
        }
    }
}
