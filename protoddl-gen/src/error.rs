//! Error types for configuration, schema loading and DDL file output

use protoddl::TranslateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported schema file {}: expected .toml or .json", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
