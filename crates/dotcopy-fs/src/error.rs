//! Error types for dotcopy-fs

use std::path::PathBuf;

/// Result type for dotcopy-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dotcopy-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {source_path} -> {destination}: {source}")]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} and its destination are the same file")]
    SameFile { path: PathBuf },

    #[error("Unsupported file type at {path}")]
    UnsupportedFileType { path: PathBuf },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Failed to copy tree {source_root} -> {destination}: {}", summarize(.failures))]
    Tree {
        source_root: PathBuf,
        destination: PathBuf,
        failures: Vec<Error>,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn copy(
        source_path: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Copy {
            source_path: source_path.into(),
            destination: destination.into(),
            source,
        }
    }
}

fn summarize(failures: &[Error]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
