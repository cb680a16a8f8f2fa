mod everything;

pub use everything::{EverythingCli, parse_output};

use run_types::Candidate;
use std::path::PathBuf;
use thiserror::Error;

/// One query against the file index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Everything search text
    pub pattern: String,

    /// Match whole words only
    pub whole_word: bool,

    /// Upper bound on returned hits
    pub max_results: usize,
}

/// Failure kinds reported by the Everything client
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Everything error: REGISTERCLASSEX")]
    RegisterClassEx,

    #[error("Everything error: CREATEWINDOW")]
    CreateWindow,

    #[error("Everything error: Is EverythingSearch running? (IPC)")]
    Ipc,

    #[error("Everything error: MEMORY")]
    Memory,

    #[error("Everything error: INVALIDCALL")]
    InvalidCall,

    #[error("Everything error: Unknown error code {0}")]
    Unknown(i32),

    #[error("Everything error: could not start {} - {source}", .program.display())]
    ClientUnavailable {
        program: PathBuf,
        source: std::io::Error,
    },
}

impl SearchError {
    /// Map an `es.exe` exit status to its error kind, `None` for success
    #[must_use]
    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::RegisterClassEx),
            2 => Some(Self::CreateWindow),
            3 => Some(Self::Memory),
            4 | 6 => Some(Self::InvalidCall),
            7 | 8 => Some(Self::Ipc),
            other => Some(Self::Unknown(other)),
        }
    }
}

/// Synchronous access to a ranked file index.
///
/// Hits come back in the index's relevance order; callers rely on that order
/// for "pick the Nth" semantics.
pub trait SearchIndex {
    /// Run one query to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be reached or rejects the query.
    fn query(&mut self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError>;
}

impl<T: SearchIndex + ?Sized> SearchIndex for &mut T {
    fn query(&mut self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError> {
        (**self).query(query)
    }
}
