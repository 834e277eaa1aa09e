use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of a resource a caller expected to find at a path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    File,
    Directory,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::File => write!(f, "file"),
            ResourceKind::Directory => write!(f, "directory"),
        }
    }
}

/// Errors returned by every fallible operation of this crate.
///
/// Construction errors always keep the raw path given by the caller together with the lower-level
/// cause, so a broken legality pattern (`ConstructionError::PatternEngine`) can be told apart from
/// plain invalid input (`ConstructionError::InvalidSegment`).
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to construct path '{path}'")]
    Construction {
        path: String,
        #[source]
        cause: ConstructionError,
    },

    #[error("{} does not exist", .0.display())]
    ResourceMissing(PathBuf),

    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{} is not a {expected}", .path.display())]
    WrongKind { path: PathBuf, expected: ResourceKind },

    #[error("invalid mask '{mask}'")]
    InvalidMask {
        mask: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The reason a `Path`, `Dir` or `File` could not be constructed.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("segment '{segment}' contains illegal characters")]
    InvalidSegment { segment: String },

    #[error("segment legality pattern could not be evaluated")]
    PatternEngine(#[source] regex::Error),

    #[error("{} exists but is not a directory", .prefix.display())]
    NonDirPrefix { prefix: PathBuf },

    #[error("path does not denote a directory")]
    NotADirectory,

    #[error("path denotes a directory")]
    IsADirectory,

    #[error("current working directory is unavailable")]
    CurrentDir(#[source] std::io::Error),
}

impl Error {
    pub(crate) fn construction<S: Into<String>>(path: S, cause: ConstructionError) -> Self {
        Error::Construction {
            path: path.into(),
            cause,
        }
    }

    /// Returns the construction cause, if this is a construction error.
    pub fn construction_cause(&self) -> Option<&ConstructionError> {
        match self {
            Error::Construction { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
