//! Shared types for the run launcher.
//!
//! This crate provides the data model passed between run-core and the `run`
//! binary: search candidates, favorites, resolution requests and outcomes.

use std::fmt;

/// Directory separator used by the search index when reporting paths
pub const PATH_SEPARATOR: char = '\\';

/// One search hit reported by the file index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name including extension
    pub file_name: String,

    /// Containing directory, without a trailing separator
    pub directory_path: String,
}

impl Candidate {
    #[must_use]
    pub fn new(file_name: impl Into<String>, directory_path: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            directory_path: directory_path.into(),
        }
    }

    /// Split a full path at its last separator.
    ///
    /// A path without any separator becomes a bare file name with an empty
    /// directory.
    #[must_use]
    pub fn from_full_path(path: &str) -> Self {
        match path.rfind(PATH_SEPARATOR) {
            Some(pos) => Self::new(&path[pos + 1..], &path[..pos]),
            None => Self::new(path, ""),
        }
    }

    /// Directory and file name joined with the index separator
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.directory_path.is_empty() {
            return self.file_name.clone();
        }
        format!(
            "{}{PATH_SEPARATOR}{}",
            self.directory_path, self.file_name
        )
    }
}

/// A remembered name → executable mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Literal key, stored without search wildcards
    pub name: String,

    /// Full path recorded when the favorite was saved
    pub executable_path: String,
}

impl Favorite {
    #[must_use]
    pub fn new(name: impl Into<String>, executable_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executable_path: executable_path.into(),
        }
    }
}

/// What the user asked the resolver to do with a typed program name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Program name exactly as typed
    pub pattern: String,

    /// Require whole-word matches at every relaxation level
    pub whole_word: bool,

    /// 1-based candidate ordinal, 0 when the user did not pick one
    pub chosen_option: u32,

    /// Only list candidates, never launch
    pub list_only: bool,
}

impl ResolutionRequest {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Whether the user picked a candidate with `-N`
    #[must_use]
    pub fn has_explicit_option(&self) -> bool {
        self.chosen_option != 0
    }

    /// Ordinal to select, defaulting to the first candidate
    #[must_use]
    pub fn effective_option(&self) -> u32 {
        self.chosen_option.max(1)
    }
}

/// One row of a candidate listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// 1-based position among non-noise candidates
    pub ordinal: u32,
    pub candidate: Candidate,
    /// Matches the requested ordinal
    pub chosen: bool,
    /// Matches the stored favorite for this name
    pub is_default: bool,
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}) {}{} [{}]{}",
            self.ordinal,
            if self.chosen { "CHOSEN: " } else { "" },
            self.candidate.file_name,
            self.candidate.directory_path,
            if self.is_default { " (default)" } else { "" }
        )
    }
}

/// Result of resolving a request against the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Exactly one executable path was chosen
    Resolved(String),

    /// The caller asked for a listing instead of a single path
    Ambiguous(Vec<ListingEntry>),

    /// Every relaxation level came back empty
    NotFound { query: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_full_path() {
        let candidate = Candidate::new("chrome.exe", r"C:\Apps");
        assert_eq!(candidate.full_path(), r"C:\Apps\chrome.exe");
    }

    #[test]
    fn test_candidate_full_path_without_directory() {
        let candidate = Candidate::new("chrome.exe", "");
        assert_eq!(candidate.full_path(), "chrome.exe");
    }

    #[test]
    fn test_candidate_from_full_path() {
        let candidate = Candidate::from_full_path(r"C:\Program Files\Mozilla Firefox\firefox.exe");
        assert_eq!(candidate.file_name, "firefox.exe");
        assert_eq!(candidate.directory_path, r"C:\Program Files\Mozilla Firefox");
    }

    #[test]
    fn test_candidate_from_bare_name() {
        let candidate = Candidate::from_full_path("notepad.exe");
        assert_eq!(candidate.file_name, "notepad.exe");
        assert!(candidate.directory_path.is_empty());
    }

    #[test]
    fn test_request_effective_option_defaults_to_first() {
        let request = ResolutionRequest::new("chrome");
        assert!(!request.has_explicit_option());
        assert_eq!(request.effective_option(), 1);

        let request = ResolutionRequest {
            chosen_option: 4,
            ..ResolutionRequest::new("chrome")
        };
        assert!(request.has_explicit_option());
        assert_eq!(request.effective_option(), 4);
    }

    #[test]
    fn test_listing_entry_display_plain() {
        let entry = ListingEntry {
            ordinal: 2,
            candidate: Candidate::new("code.exe", r"C:\Tools"),
            chosen: false,
            is_default: false,
        };
        assert_eq!(entry.to_string(), r"2) code.exe [C:\Tools]");
    }

    #[test]
    fn test_listing_entry_display_chosen_default() {
        let entry = ListingEntry {
            ordinal: 1,
            candidate: Candidate::new("code.exe", r"C:\Tools"),
            chosen: true,
            is_default: true,
        };
        assert_eq!(entry.to_string(), r"1) CHOSEN: code.exe [C:\Tools] (default)");
    }

    mod proptest_path_tests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn full_path_survives_split(
                dirs in proptest::collection::vec("[A-Za-z0-9 _.]{1,12}", 1..5),
                name in "[A-Za-z0-9_]{1,12}\\.exe",
            ) {
                let path = format!("{}{PATH_SEPARATOR}{name}", dirs.join("\\"));
                let candidate = Candidate::from_full_path(&path);
                prop_assert_eq!(&candidate.file_name, &name);
                prop_assert_eq!(candidate.full_path(), path);
            }
        }
    }
}
