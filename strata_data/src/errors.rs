//! Error types for dataset loading.

use std::path::PathBuf;

/// Errors that can occur when loading record collections from disk.
///
/// This is the only fallible surface in the system: once collections are in
/// memory, aggregation degrades missing references to display fallbacks
/// instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    /// A collection file could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file contained invalid JSON or an unexpected shape.
    #[error("failed to parse {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
