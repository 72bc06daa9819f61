//! Modes and mode names
//!
//! Names are case-insensitive: they are trimmed and lowercased on the way in,
//! so `"  Work "` and `"work"` refer to the same mode.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entry::{normalize_entries, EntryKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Mode name must not be empty")]
    EmptyName,

    #[error("Mode '{0}' needs at least one command or URL")]
    NoEntries(String),
}

/// Normalized mode name (trimmed, lowercase, non-empty)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModeName(String);

impl ModeName {
    /// Normalizes and validates a raw name
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModeName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModeName {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<ModeName> for String {
    fn from(name: ModeName) -> Self {
        name.0
    }
}

// Lets maps keyed by ModeName be queried with an already-normalized &str.
impl Borrow<str> for ModeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A named, ordered list of commands and URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode {
    pub name: ModeName,
    pub entries: Vec<String>,
}

impl Mode {
    /// Builds a mode from raw user input, normalizing name and entries
    pub fn new<I, S>(name: &str, entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = ModeName::new(name)?;
        let entries = normalize_entries(entries);
        if entries.is_empty() {
            return Err(ValidationError::NoEntries(name.to_string()));
        }
        Ok(Self { name, entries })
    }

    /// Entries paired with how each will be dispatched
    pub fn classified(&self) -> impl Iterator<Item = (&str, EntryKind)> {
        self.entries
            .iter()
            .map(|entry| (entry.as_str(), EntryKind::classify(entry)))
    }
}
