//! Error types shared by every module of the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while generating urls or compiling sources.
#[derive(Debug, Error)]
pub enum Error {
    /// A logical path did not start with the `~` root marker.
    #[error("path must be application relative (starting with '~'): `{path}`")]
    InvalidPath { path: String },

    /// A filename argument was malformed.
    #[error("`{param}` must be application relative (starting with '~'), got `{value}`")]
    InvalidArgument { param: &'static str, value: String },

    /// A referenced file is absent from the content directory.
    #[error("file not found: `{path}`")]
    NotFound { path: String },

    /// The transform engine reported one or more errors.
    #[error("{0}")]
    Compile(String),

    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_argument(param: &'static str, value: &str) -> Self {
        Self::InvalidArgument {
            param,
            value: value.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
