//! Error types for map management and path queries.

use gridway_paths::SearchError;
use thiserror::Error;

/// Errors reported by [`crate::MapService`] and the registry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("map not found: {0}")]
    MapNotFound(String),

    /// A normal outcome: the map holds no route between the two points.
    #[error("no path found")]
    PathNotFound,

    #[error("malformed map snapshot: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameters,
    MapNotFound,
    PathNotFound,
    /// Persistence or image file failure, including malformed content.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Error::MapNotFound(_) => ErrorKind::MapNotFound,
            Error::PathNotFound => ErrorKind::PathNotFound,
            Error::Snapshot(_) | Error::Io(_) | Error::Image(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn map_not_found(id: &str) -> Self {
        Error::MapNotFound(id.to_owned())
    }
}

impl From<SearchError> for Error {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidParameters(msg) => Error::InvalidParameters(msg),
            SearchError::PathNotFound => Error::PathNotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
