//! # Filesystem Storage
//!
//! [`FileStorage`] keeps each storage key in its own file under a data
//! directory.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//! ├── user       # JSON identity record
//! ├── token      # raw bearer token
//! └── cart       # JSON array of line items
//! ```
//!
//! ## Platform data directories
//!
//! [`StorageConfig::default_location`] uses `directories::ProjectDirs`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/com.bookstore.storefront/` |
//! | Linux | `~/.local/share/storefront/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\bookstore\storefront\data\` |
//!
//! ## Fault Handling
//! A read that fails for any reason looks like an absent key. A failed
//! write or remove is logged at `warn` and dropped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bookstore_core::KeyValueStore;
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Configuration
// =============================================================================

/// Where the storefront keeps its local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding one file per key. Created on open.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
        }
    }

    /// The platform data directory for the storefront.
    pub fn default_location() -> StorageResult<Self> {
        default_data_dir().map(Self::new)
    }
}

/// Returns the platform data directory, e.g. `~/.local/share/storefront`.
pub fn default_data_dir() -> StorageResult<PathBuf> {
    ProjectDirs::from("com", "bookstore", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDirectory)
}

// =============================================================================
// File Backend
// =============================================================================

/// One-file-per-key [`KeyValueStore`].
#[derive(Debug)]
pub struct FileStorage {
    base: PathBuf,
    // Serializes writers within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens (creating if needed) the data directory.
    pub fn open(config: &StorageConfig) -> StorageResult<Self> {
        let base = config.data_dir.clone();

        if base.exists() && !base.is_dir() {
            return Err(StorageError::NotADirectory(base));
        }

        fs::create_dir_all(&base).map_err(|source| StorageError::CreateDir {
            path: base.clone(),
            source,
        })?;

        debug!(path = %base.display(), "Opened file storage");
        Ok(FileStorage {
            base,
            write_lock: Mutex::new(()),
        })
    }

    /// The directory the keys live in.
    pub fn path(&self) -> &Path {
        &self.base
    }

    /// Maps a key to its file. Keys that could escape the directory are
    /// refused.
    fn key_path(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            warn!(key, "Refusing invalid storage key");
            return None;
        }
        Some(self.base.join(key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read storage entry");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Some(path) = self.key_path(key) else {
            return;
        };
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        // Write beside the target then rename, so readers never see half a value.
        let tmp = path.with_extension("tmp");
        let result = fs::write(&tmp, value).and_then(|_| fs::rename(&tmp, &path));

        if let Err(e) = result {
            warn!(key, error = %e, "Failed to write storage entry");
            let _ = fs::remove_file(&tmp);
        }
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.key_path(key) else {
            return;
        };
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "Failed to remove storage entry"),
        }
    }
}
