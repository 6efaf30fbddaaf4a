//! Catalog loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading the route catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a JSON document (or array of documents)
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
