use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while reading or writing a database directory.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A required table file is not present under the database root.
    #[error("missing database table: {}", .0.display())]
    MissingTable(PathBuf),

    /// Wrapper around IO errors (reading tables, creating directories, etc.).
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table could not be parsed or serialized.
    #[error("json error on {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DatabaseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatabaseError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DatabaseError::Json {
            path: path.into(),
            source,
        }
    }
}
