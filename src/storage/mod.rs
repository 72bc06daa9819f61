//! # Storage Layer
//!
//! Persistence for Cue.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Modes | JSON object of name -> entries | `$DATA_DIR/cue/modes.json` |
//! | Config | TOML | `$CONFIG_DIR/cue/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`ModeStore`] takes an exclusive `fs2` lock on `modes.json.lock` for
//!   every load-modify-save cycle, so concurrent `cue` invocations never
//!   lose each other's updates
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`ModeStore`] - Read/write modes
//! - [`Config`] - User configuration

mod config;
mod store;

pub use config::{Config, ConfigError, OutputFormat};
pub use store::{ModeMap, ModeStore, StoreError};
