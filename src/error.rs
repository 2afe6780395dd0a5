use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by discovery, backup and conversion.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("No XML files found under {}", root.display())]
    NoAnnotationFiles { root: PathBuf },

    #[error("The specified xml_dir does not exist: {}", root.display())]
    RootNotFound { root: PathBuf },

    #[error("Failed to parse XML ({}): {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: xmltree::ParseError,
    },

    #[error("Failed to write XML ({}): {message}", path.display())]
    Serialize { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule table ({}): {source}", path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NormalizeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
