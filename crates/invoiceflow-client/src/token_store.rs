//! # Token Store
//!
//! Where a session lives between runs.
//!
//! ```text
//! ┌──────────────────┐   save / load / clear   ┌──────────────────────────┐
//! │  SessionContext  │────────────────────────►│  dyn TokenStore          │
//! └──────────────────┘                         │  ├── FileTokenStore (CLI)│
//!                                              │  └── MemoryTokenStore    │
//!                                              └──────────────────────────┘
//! ```
//!
//! The file store writes JSON. On Unix the file is created `0600`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Persistence for the current session.
pub trait TokenStore: Send + Sync {
    /// Returns the stored session, or `None` if nothing is stored.
    fn load(&self) -> ClientResult<Option<Session>>;

    fn save(&self, session: &Session) -> ClientResult<()>;

    /// Removes the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> ClientResult<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// Session persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error("read", &self.path, e)),
        };

        let session = serde_json::from_str(&raw)
            .map_err(|e| ClientError::TokenStore(format!("corrupt session file: {}", e)))?;
        debug!(path = %self.path.display(), "Loaded stored session");
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| store_error("create", parent, e))?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::TokenStore(e.to_string()))?;
        write_private(&self.path, json.as_bytes())
            .map_err(|e| store_error("write", &self.path, e))?;

        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error("remove", &self.path, e)),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

fn store_error(action: &str, path: &Path, err: std::io::Error) -> ClientError {
    ClientError::TokenStore(format!("failed to {} {}: {}", action, path.display(), err))
}

// =============================================================================
// Memory Store
// =============================================================================

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

impl MemoryTokenStore {
    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, Option<Session>>> {
        self.session
            .lock()
            .map_err(|_| ClientError::TokenStore("session mutex poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&Session::new("opaque-token", None)).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token(), "opaque-token");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.save(&Session::new("t", None)).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileTokenStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ClientError::TokenStore(_)));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        store.save(&Session::new("abc", None)).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token(), "abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
