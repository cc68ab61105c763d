//! The key-value persistence collaborator.
//!
//! The scoreboard only needs a string-keyed, string-valued store that survives
//! between sessions. [`KeyValueStore`] is that seam; implement it for whatever
//! backs your front-end (browser local storage, a settings database, ...).
//! Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: an in-process map, handy in tests.
//! - [`FileStore`]: one file per key inside a directory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{ScoreError, StorageOperation};
use crate::ScoreResult;

/// A durable string-to-string map.
///
/// Implementations are expected to make a successful [`set`](Self::set) visible
/// to the next [`get`](Self::get) of the same key, including after a restart.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> ScoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> ScoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> ScoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> ScoreResult<()> {
        (**self).remove(key)
    }
}

/// In-memory [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use marriage_scorepad::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("mariage_lang", "ru").unwrap();
/// assert_eq!(store.get("mariage_lang").unwrap().as_deref(), Some("ru"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ScoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ScoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// [`KeyValueStore`] that keeps each key in its own file under a directory.
///
/// Values are written to a temporary sibling file first and then renamed over
/// the target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates, if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> ScoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ScoreError::Storage {
            key: dir.display().to_string(),
            operation: StorageOperation::Set,
            context: format!("creating store directory: {e}"),
        })?;
        Ok(Self { dir })
    }

    /// The directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str, operation: StorageOperation) -> ScoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(ScoreError::Storage {
                key: key.to_owned(),
                operation,
                context: "key is not a valid file name".to_owned(),
            });
        }
        Ok(self.dir.join(key))
    }
}

fn storage_error(key: &str, operation: StorageOperation, err: &io::Error) -> ScoreError {
    ScoreError::Storage {
        key: key.to_owned(),
        operation,
        context: err.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ScoreResult<Option<String>> {
        let path = self.path_for(key, StorageOperation::Get)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!(key, bytes = value.len(), "read key");
                Ok(Some(value))
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key, StorageOperation::Get, &e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()> {
        let path = self.path_for(key, StorageOperation::Set)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).map_err(|e| storage_error(key, StorageOperation::Set, &e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_error(key, StorageOperation::Set, &e))?;
        trace!(key, bytes = value.len(), "wrote key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ScoreResult<()> {
        let path = self.path_for(key, StorageOperation::Remove)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key, StorageOperation::Remove, &e)),
        }
    }
}
