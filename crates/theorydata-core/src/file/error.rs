use std::path::PathBuf;
use thiserror::Error;

use crate::case::CaseError;
use crate::holder::HolderError;

/// Errors that can occur while loading case files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported case file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Invalid case #{index} '{definition}': {source}")]
    Case {
        index: usize,
        definition: String,
        #[source]
        source: CaseError,
    },

    #[error(transparent)]
    Holder(#[from] HolderError),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
