use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an export run. None of these are recoverable.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A file could not be opened, read, created or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON or is not an array of records.
    #[error("Could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A CSV record could not be serialized. Failures of the underlying
    /// file are reported as `Io`.
    #[error("Could not write CSV to {}: {reason}", path.display())]
    Csv { path: PathBuf, reason: String },

    /// The configuration file is missing or malformed.
    #[error("{0}")]
    Config(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
