//! Storage boundary: a flat string key-value store, and the fire-and-forget
//! write port the stores publish their state through.

use log::{error, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub type StoreResult<T> = Result<T, StoreError>;

/// Well-known keys of the persisted documents.
pub mod keys {
    pub const TEAMS: &str = "teams";
    pub const PLAYERS: &str = "players";
    pub const MATCHES: &str = "matches";
    pub const PRIZES: &str = "prizes";
    pub const PLAYER_STATS: &str = "playerStats";
}

#[derive(Debug)]
pub enum StoreError {
    Io { key: String, source: io::Error },
    Corrupt { key: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { key, source } => write!(f, "storage error for {key}: {source}"),
            StoreError::Corrupt { key, message } => write!(f, "unreadable value for {key}: {message}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Corrupt { .. } => None,
        }
    }
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Where the stores send their serialized state after an in-memory change.
///
/// Implementations must not block on confirmation and never report back to
/// the caller; failures are theirs to log.
pub trait WritePort {
    fn write(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Synchronous write port over any store, logging failures.
#[derive(Debug, Default)]
pub struct LoggedWrites<S>(pub S);

impl<S: KeyValueStore> WritePort for LoggedWrites<S> {
    fn write(&self, key: &str, value: String) {
        if let Err(e) = self.0.set(key, &value) {
            error!("Error saving {key}: {e}");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.0.remove(key) {
            error!("Error removing {key}: {e}");
        }
    }
}

/// Process-local store, used for ephemeral sessions and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_string(), value.to_string());
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let io_err = |source| StoreError::Io { key: key.to_string(), source };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        // Readers never observe a half-written document.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, self.path_for(key)).map_err(io_err)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { key: key.to_string(), source }),
        }
    }
}

/// Read and decode one document. `Ok(None)` when the key was never written.
pub fn load_json<T: serde::de::DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Corrupt { key: key.to_string(), message: e.to_string() })
}

/// Read a list document entry by entry. Entries that fail to decode are
/// skipped and logged; the rest are kept in stored order.
pub fn load_list<T: serde::de::DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<Vec<T>>> {
    let Some(entries) = load_json::<Vec<Value>>(kv, key)? else {
        return Ok(None);
    };
    let items = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("skipping unreadable entry in {key}: {e}");
                None
            }
        })
        .collect();
    Ok(Some(items))
}

/// Encode a document and hand it to the write port.
pub fn write_json<T: serde::Serialize + ?Sized>(port: &dyn WritePort, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(payload) => port.write(key, payload),
        Err(e) => error!("Error encoding {key}: {e}"),
    }
}

/// A store whose every call fails with an I/O error.
#[cfg(test)]
pub(crate) struct BrokenStore;

#[cfg(test)]
impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Io { key: key.to_string(), source: io::Error::other("disk unplugged") })
    }

    fn set(&self, key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Io { key: key.to_string(), source: io::Error::other("disk unplugged") })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        Err(StoreError::Io { key: key.to_string(), source: io::Error::other("disk unplugged") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    #[test]
    fn memory_store_round_trips_and_removes() {
        let kv = MemoryStore::new();
        assert_eq!(kv.get("teams").unwrap(), None);
        kv.set("teams", "[]").unwrap();
        assert_eq!(kv.get("teams").unwrap().as_deref(), Some("[]"));
        kv.remove("teams").unwrap();
        assert_eq!(kv.get("teams").unwrap(), None);
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileStore::new(dir.path().join("nested"));
        assert_eq!(kv.get(keys::MATCHES).unwrap(), None);
        kv.remove(keys::MATCHES).unwrap();
    }

    #[test]
    fn file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileStore::new(dir.path());
        kv.set(keys::PRIZES, r#"[{"id":"1"}]"#).unwrap();
        assert!(dir.path().join("prizes.json").exists());
        assert!(!dir.path().join("prizes.json.tmp").exists());
        assert_eq!(kv.get(keys::PRIZES).unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));

        kv.remove(keys::PRIZES).unwrap();
        assert!(!dir.path().join("prizes.json").exists());
    }

    #[test]
    fn load_json_reports_corrupt_documents() {
        let kv = MemoryStore::new().with_entry(keys::TEAMS, "{not json");
        let err = load_json::<Vec<String>>(&kv, keys::TEAMS).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "teams"));
        assert!(err.to_string().contains("teams"));
    }

    #[test]
    fn logged_writes_apply_to_the_store() {
        let port = LoggedWrites(MemoryStore::new());
        write_json(&port, keys::PLAYERS, &vec!["a", "b"]);
        assert_eq!(port.0.get(keys::PLAYERS).unwrap().as_deref(), Some(r#"["a","b"]"#));
        port.remove(keys::PLAYERS);
        assert_eq!(port.0.get(keys::PLAYERS).unwrap(), None);
    }

    #[test]
    fn load_list_skips_entries_that_do_not_decode() {
        let raw = r#"[{"id":"1","name":"Lions"},{"id":2},{"id":"3","name":"Tigers"}]"#;
        let kv = MemoryStore::new().with_entry(keys::TEAMS, raw);
        let teams: Vec<Team> = load_list(&kv, keys::TEAMS).unwrap().unwrap();
        let names: Vec<_> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Lions", "Tigers"]);

        let not_a_list = MemoryStore::new().with_entry(keys::TEAMS, r#"{"id":"1"}"#);
        assert!(matches!(
            load_list::<Team>(&not_a_list, keys::TEAMS),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn logged_writes_swallow_store_failures() {
        let port = LoggedWrites(BrokenStore);
        write_json(&port, keys::PLAYERS, &vec!["a"]);
        port.remove(keys::PLAYERS);

        let err = load_json::<Vec<String>>(&BrokenStore, keys::PLAYERS).unwrap_err();
        assert!(matches!(err, StoreError::Io { ref key, .. } if key == "players"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
