use crate::search::SearchError;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code when every relaxation level came back empty
pub const EXIT_NOT_FOUND: i32 = 3;

/// Exit code when the search index could not be queried
pub const EXIT_SEARCH_ERROR: i32 = 5;

/// Exit code for failed actions that have no dedicated code
pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{query} not found")]
    NotFound { query: String },

    #[error("Favorite number {0} is not valid")]
    InvalidSelection(u32),

    #[error("Could not find favorite program '{0}' to delete")]
    FavoriteNotFound(String),

    #[error("Could not open favorites file '{}' for write - {source}", .path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not start '{path}' - {source}")]
    Spawn {
        path: String,
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit status reported for this failure
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Search(_) => EXIT_SEARCH_ERROR,
            Self::NotFound { .. } => EXIT_NOT_FOUND,
            Self::Io(_)
            | Self::Json(_)
            | Self::InvalidSelection(_)
            | Self::FavoriteNotFound(_)
            | Self::Persistence { .. }
            | Self::Spawn { .. } => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
