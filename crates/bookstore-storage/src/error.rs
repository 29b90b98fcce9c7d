//! # Storage Error Types
//!
//! Only opening a store can fail. Once open, per-key read and write faults
//! are logged and absorbed so cart and session calls stay infallible.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing the data directory.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No home directory to derive a platform data directory from.
    #[error("Could not determine a data directory for this platform")]
    NoDataDirectory,

    /// The data directory could not be created.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Something other than a directory sits at the data path.
    #[error("{0} exists and is not a directory")]
    NotADirectory(PathBuf),
}

/// Result type for storage setup.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::NotADirectory(PathBuf::from("/tmp/cart"));
        assert_eq!(err.to_string(), "/tmp/cart exists and is not a directory");

        let err = StorageError::CreateDir {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Failed to create data directory /nope"));
    }
}
