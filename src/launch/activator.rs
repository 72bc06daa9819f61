//! Mode activation
//!
//! Entries are dispatched strictly in stored order. A failing entry is
//! recorded and the batch moves on; activation never stops early.

use thiserror::Error;

use super::{LaunchFailure, ProcessSpawner, UrlOpener};
use crate::domain::{EntryKind, ModeName};
use crate::storage::{ModeStore, StoreError};

/// One entry that could not be launched
#[derive(Debug, Error)]
#[error("{entry}: {cause}")]
pub struct LaunchError {
    pub entry: String,
    pub kind: EntryKind,
    pub cause: LaunchFailure,
}

/// Outcome of activating a mode
#[derive(Debug)]
pub struct ActivationReport {
    pub mode_name: ModeName,
    pub succeeded: Vec<String>,
    pub failed: Vec<LaunchError>,
}

impl ActivationReport {
    fn new(mode_name: ModeName) -> Self {
        Self {
            mode_name,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// True when every entry launched
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of entries dispatched
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Resolves modes in a store and launches their entries
pub struct Activator<'a, U, P> {
    store: &'a ModeStore,
    opener: U,
    spawner: P,
}

impl<'a, U, P> Activator<'a, U, P>
where
    U: UrlOpener,
    P: ProcessSpawner,
{
    pub fn new(store: &'a ModeStore, opener: U, spawner: P) -> Self {
        Self {
            store,
            opener,
            spawner,
        }
    }

    /// Launches every entry of the named mode
    ///
    /// Fails only if the mode does not exist, in which case nothing is
    /// dispatched. Per-entry failures end up in the report.
    pub fn activate(&self, name: &str) -> Result<ActivationReport, StoreError> {
        let mode = self.store.get(name)?;
        tracing::debug!(mode = %mode.name, entries = mode.entries.len(), "activating mode");

        let mut report = ActivationReport::new(mode.name.clone());
        for (entry, kind) in mode.classified() {
            let result = match kind {
                EntryKind::Url => self.opener.open(entry),
                EntryKind::Command => self.spawner.spawn(entry),
            };

            match result {
                Ok(()) => {
                    tracing::debug!(%kind, entry, "launched");
                    report.succeeded.push(entry.to_string());
                }
                Err(cause) => {
                    tracing::warn!(%kind, entry, error = %cause, "launch failed");
                    report.failed.push(LaunchError {
                        entry: entry.to_string(),
                        kind,
                        cause,
                    });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;
    use tempfile::TempDir;

    /// Records every dispatch and fails for selected entries
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(EntryKind, String)>>,
        failing: HashSet<String>,
    }

    impl Recorder {
        fn failing(entries: &[&str]) -> Self {
            Self {
                failing: entries.iter().map(|e| e.to_string()).collect(),
                ..Self::default()
            }
        }

        fn record(&self, kind: EntryKind, entry: &str) -> Result<(), LaunchFailure> {
            self.calls.borrow_mut().push((kind, entry.to_string()));
            if self.failing.contains(entry) {
                return Err(LaunchFailure::Spawn {
                    program: "sh".to_string(),
                    error: io::Error::new(io::ErrorKind::NotFound, "simulated"),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<(EntryKind, String)> {
            self.calls.borrow().clone()
        }
    }

    impl UrlOpener for Recorder {
        fn open(&self, url: &str) -> Result<(), LaunchFailure> {
            self.record(EntryKind::Url, url)
        }
    }

    impl ProcessSpawner for Recorder {
        fn spawn(&self, command_line: &str) -> Result<(), LaunchFailure> {
            self.record(EntryKind::Command, command_line)
        }
    }

    fn store_with(dir: &TempDir, modes: &[(&str, &[&str])]) -> ModeStore {
        let mut store = ModeStore::open(dir.path().join("modes.json")).unwrap();
        for (name, entries) in modes {
            store.create_or_replace(name, entries.iter()).unwrap();
        }
        store
    }

    #[test]
    fn partial_failure_keeps_going() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &[("mix", &["https://ok.example", "bad-command-xyz"])]);
        let recorder = Recorder::failing(&["bad-command-xyz"]);

        let report = Activator::new(&store, &recorder, &recorder)
            .activate("mix")
            .unwrap();

        assert_eq!(report.mode_name.as_str(), "mix");
        assert_eq!(report.succeeded, vec!["https://ok.example"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].entry, "bad-command-xyz");
        assert_eq!(report.failed[0].kind, EntryKind::Command);
        assert!(!report.is_success());
        assert_eq!(report.attempted(), 2);

        assert_eq!(
            recorder.calls(),
            vec![
                (EntryKind::Url, "https://ok.example".to_string()),
                (EntryKind::Command, "bad-command-xyz".to_string()),
            ]
        );
    }

    #[test]
    fn failure_in_the_middle_does_not_block_later_entries() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &[("work", &["first", "https://broken.example", "third"])]);
        let recorder = Recorder::failing(&["https://broken.example"]);

        let report = Activator::new(&store, &recorder, &recorder)
            .activate("work")
            .unwrap();

        assert_eq!(report.succeeded, vec!["first", "third"]);
        assert_eq!(report.failed[0].entry, "https://broken.example");
        assert_eq!(recorder.calls().len(), 3);
    }

    #[test]
    fn unknown_mode_dispatches_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &[("work", &["code ."])]);
        let recorder = Recorder::default();

        let err = Activator::new(&store, &recorder, &recorder)
            .activate("ghost")
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(ref name) if name == "ghost"));
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &[("work", &["code ."])]);
        let recorder = Recorder::default();

        let report = Activator::new(&store, &recorder, &recorder)
            .activate("  WORK ")
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.succeeded, vec!["code ."]);
    }

    #[test]
    fn entries_are_routed_by_prefix() {
        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            &[("routes", &["http://x", "https://x", "httpsx", "ftp://x"])],
        );
        let opener = Recorder::default();
        let spawner = Recorder::default();

        Activator::new(&store, &opener, &spawner)
            .activate("routes")
            .unwrap();

        let opened: Vec<_> = opener.calls().into_iter().map(|(_, e)| e).collect();
        let spawned: Vec<_> = spawner.calls().into_iter().map(|(_, e)| e).collect();
        assert_eq!(opened, vec!["http://x", "https://x"]);
        assert_eq!(spawned, vec!["httpsx", "ftp://x"]);
    }

    #[test]
    fn duplicate_entries_are_each_dispatched() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, &[("twice", &["ping", "ping"])]);
        let recorder = Recorder::default();

        let report = Activator::new(&store, &recorder, &recorder)
            .activate("twice")
            .unwrap();

        assert_eq!(report.succeeded, vec!["ping", "ping"]);
    }
}
