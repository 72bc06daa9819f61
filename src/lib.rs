//! Cue - launch a whole working setup with one word
//!
//! A "mode" is a named, ordered list of shell commands and URLs. Modes are
//! kept in a local JSON file; activating a mode opens every URL in the
//! browser and starts every command as a detached process.

pub mod domain;
pub mod storage;
pub mod launch;
pub mod cli;

pub use domain::{EntryKind, Mode, ModeName, ValidationError};
pub use launch::{ActivationReport, Activator, LaunchError, LaunchFailure};
pub use storage::{ModeStore, StoreError};
