//! Domain models for Cue
//!
//! Mode names, entry normalization and entry classification, without any
//! I/O concerns.

mod entry;
mod mode;

pub use entry::{normalize_entries, EntryKind};
pub use mode::{Mode, ModeName, ValidationError};
