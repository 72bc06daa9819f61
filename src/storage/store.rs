//! JSON storage for modes
//!
//! Modes live in a single JSON object mapping mode name to its entries.
//! Every mutation takes an exclusive lock on a sibling `.lock` file, reloads
//! the store, applies the change and writes the whole mapping back through a
//! temp file + rename.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::{Mode, ModeName, ValidationError};

/// Mode name to entries, ordered by name
pub type ModeMap = BTreeMap<ModeName, Vec<String>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Mode '{0}' already exists")]
    DuplicateName(ModeName),

    #[error("No mode found with name '{0}'")]
    NotFound(String),

    #[error("Mode store {} is corrupt and needs fixing by hand", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read mode store {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write mode store {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Store for modes backed by one JSON file
pub struct ModeStore {
    path: PathBuf,
    modes: ModeMap,
}

impl ModeStore {
    /// Opens the store at the given path, loading it once
    ///
    /// A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let modes = read_modes(&path)?;
        tracing::debug!(path = %path.display(), modes = modes.len(), "loaded mode store");
        Ok(Self { path, modes })
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current contents of the store file
    pub fn load(&self) -> Result<ModeMap, StoreError> {
        read_modes(&self.path)
    }

    /// Replaces the whole store with `modes`
    ///
    /// The current file is not read, so this also overwrites a corrupt store.
    pub fn save(&mut self, modes: &ModeMap) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        write_modes(&self.path, modes)?;
        self.modes.clone_from(modes);
        tracing::debug!(path = %self.path.display(), modes = modes.len(), "saved mode store");
        Ok(())
    }

    /// Inserts a mode, overwriting any mode with the same name
    pub fn create_or_replace<I, S>(&mut self, name: &str, entries: I) -> Result<Mode, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = Mode::new(name, entries)?;
        self.mutate(|modes| {
            modes.insert(mode.name.clone(), mode.entries.clone());
            Ok(())
        })?;
        tracing::debug!(mode = %mode.name, entries = mode.entries.len(), "saved mode");
        Ok(mode)
    }

    /// Replaces the entries of `old_name`, renaming it to `new_name`
    ///
    /// Fails without touching the store if the new name belongs to another
    /// mode.
    pub fn rename_and_update<I, S>(
        &mut self,
        old_name: &str,
        new_name: &str,
        entries: I,
    ) -> Result<Mode, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = Mode::new(new_name, entries)?;
        let old_key = lookup_key(old_name);

        self.mutate(|modes| {
            let renaming = mode.name.as_str() != old_key;
            if renaming && modes.contains_key(mode.name.as_str()) {
                return Err(StoreError::DuplicateName(mode.name.clone()));
            }
            if renaming {
                modes.remove(old_key.as_str());
            }
            modes.insert(mode.name.clone(), mode.entries.clone());
            Ok(())
        })?;
        tracing::debug!(from = %old_key, to = %mode.name, "updated mode");
        Ok(mode)
    }

    /// Removes a mode; returns whether it existed
    pub fn delete(&mut self, name: &str) -> Result<bool, StoreError> {
        let key = lookup_key(name);
        let removed = self.mutate(|modes| Ok(modes.remove(key.as_str()).is_some()))?;
        tracing::debug!(mode = %key, removed, "deleted mode");
        Ok(removed)
    }

    /// Looks up a mode by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<Mode, StoreError> {
        let key = lookup_key(name);
        self.modes
            .get_key_value(key.as_str())
            .map(|(name, entries)| Mode {
                name: name.clone(),
                entries: entries.clone(),
            })
            .ok_or(StoreError::NotFound(key))
    }

    /// Returns true if a mode with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.modes.contains_key(lookup_key(name).as_str())
    }

    /// All modes, sorted by name
    pub fn list(&self) -> Vec<Mode> {
        self.modes
            .iter()
            .map(|(name, entries)| Mode {
                name: name.clone(),
                entries: entries.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Runs one load-modify-save cycle under the store lock
    ///
    /// `apply` works on a copy of the freshly loaded mapping; if it fails the
    /// file is left untouched. Unchanged mappings are not rewritten.
    fn mutate<T, F>(&mut self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut ModeMap) -> Result<T, StoreError>,
    {
        let _lock = self.lock()?;

        let current = read_modes(&self.path)?;
        let mut updated = current.clone();
        let value = apply(&mut updated)?;

        if updated != current {
            write_modes(&self.path, &updated)?;
        }

        // Lock is released when `_lock` is dropped
        self.modes = updated;
        Ok(value)
    }

    fn lock(&self) -> Result<File, StoreError> {
        let persist_err = |source| StoreError::Persist {
            path: self.path.clone(),
            source,
        };

        ensure_parent_dir(&self.path).map_err(persist_err)?;

        let lock_path = sibling(&self.path, ".lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(persist_err)?;

        file.lock_exclusive().map_err(persist_err)?;
        Ok(file)
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Appends a suffix to the full file name (`modes.json` -> `modes.json.lock`)
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn read_modes(path: &Path) -> Result<ModeMap, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ModeMap::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn write_modes(path: &Path, modes: &ModeMap) -> Result<(), StoreError> {
    let persist_err = |source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    };

    ensure_parent_dir(path).map_err(persist_err)?;

    // Write to temp file first
    let temp_path = sibling(path, ".tmp");
    {
        let file = File::create(&temp_path).map_err(persist_err)?;
        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, modes).map_err(|e| persist_err(e.into()))?;
        writeln!(writer).map_err(persist_err)?;
        writer.flush().map_err(persist_err)?;
        file.sync_all().map_err(persist_err)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path).map_err(persist_err)?;
    Ok(())
}
