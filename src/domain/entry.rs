//! Mode entries
//!
//! An entry is a single line: either a URL handed to the browser or a
//! command line handed to the shell. Only `http://` and `https://` count as
//! URLs; anything else (including `steam://` or `ftp://` links) runs through
//! the shell, which is where platform URL handlers get picked up anyway.

use std::fmt;

use serde::Serialize;

const URL_PREFIXES: [&str; 2] = ["http://", "https://"];

/// How an entry is dispatched on activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Url,
    Command,
}

impl EntryKind {
    /// Classifies an entry by case-sensitive prefix match
    pub fn classify(entry: &str) -> Self {
        if URL_PREFIXES.iter().any(|prefix| entry.starts_with(prefix)) {
            EntryKind::Url
        } else {
            EntryKind::Command
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Url => "url",
            EntryKind::Command => "command",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Normalizes raw entry input
///
/// Every item is split into lines; lines are trimmed and blank lines are
/// dropped. Order is kept and duplicates are allowed.
pub fn normalize_entries<I, S>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries = Vec::new();
    for item in input {
        entries.extend(
            item.as_ref()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    entries
}
