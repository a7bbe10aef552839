//! Error types for the JSON-file storage implementation.

use std::path::PathBuf;

use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`FileDaoError`] failures.
pub type FileResult<T> = Result<T, FileDaoError>;

/// Failures that can occur while persisting the palette to disk.
#[derive(Debug, Error)]
pub enum FileDaoError {
    /// The directory holding the palette file could not be created.
    #[error("failed to create palette directory `{path}`")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The palette file exists but could not be read.
    #[error("failed to read palette file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The palette file could not be written.
    #[error("failed to write palette file `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The palette could not be serialized to JSON.
    #[error("failed to serialize palette for `{path}`")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<FileDaoError> for StorageError {
    fn from(err: FileDaoError) -> Self {
        let message = err.to_string();
        StorageError::unavailable(message, err)
    }
}
