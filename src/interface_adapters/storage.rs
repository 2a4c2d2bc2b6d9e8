use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::SessionStore;

// Durable store: a JSON object on disk that survives restarts.
// Every call re-reads the file so separate processes see each other's writes.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

type Entries = BTreeMap<String, String>;

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                format!("{} is not a valid session file: {e}", self.path.display())
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(format!("failed to read {}: {e}", self.path.display())),
        }
    }

    // A corrupted file is replaced on the next write rather than blocking logins forever.
    fn load_for_write(&self) -> Entries {
        self.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "discarding unreadable session file");
            Entries::new()
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;

        // Write then rename so readers never observe a half-written file.
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, raw)
            .map_err(|e| format!("failed to write {}: {e}", staging.display()))?;
        std::fs::rename(&staging, &self.path)
            .map_err(|e| format!("failed to replace {}: {e}", self.path.display()))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let _guard = self.guard();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.guard();
        let mut entries = self.load_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let _guard = self.guard();
        let mut entries = self.load_for_write();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

// Session-scoped store: lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.entries().remove(key);
        Ok(())
    }
}
