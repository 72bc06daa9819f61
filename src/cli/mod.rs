//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | Show every mode and its entries |
//! | `show <name>` | Show one mode |
//! | `add <name> <entry>...` | Create or replace a mode |
//! | `update <name> [--rename <new>]` | Change entries and/or rename |
//! | `activate <name>` | Launch every entry of a mode |
//! | `delete <name>` | Remove a mode |
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Some entries failed to launch, or any other error |
//! | 2 | Invalid input (empty name or entries, duplicate name) |
//! | 3 | Mode not found |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. Use `--verbose` (or `-v`) for
//! debug output on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod mode;
mod output;

pub use app::{exit_code_for, run, Cli, Commands};
pub use output::{Output, OutputFormat};
