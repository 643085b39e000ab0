//! Error types for metadata loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for loading metadata documents.
///
/// Generation itself cannot fail: every type maps to some expression.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Reading a metadata file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A metadata file is not a valid document.
    #[error("invalid metadata document {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory metadata document is not valid.
    #[error("invalid metadata document: {0}")]
    Json(#[from] serde_json::Error),

    /// Walking a metadata directory failed.
    #[error("failed to walk metadata directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The same type was loaded twice.
    #[error("type '{full_name}' from module '{module}' is defined more than once")]
    DuplicateType { module: String, full_name: String },
}
