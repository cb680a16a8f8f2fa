//! Progressive relaxation search for an executable by partial name.
//!
//! A typed name is tried at up to three levels, each one a single query:
//!
//! 1. `Exact`: `name.exe`, whole words only
//! 2. `Prefix`: `name*.exe`, whole words only
//! 3. `Relaxed`: `name*.exe` anywhere in a word, skipped when the caller
//!    insists on whole words
//!
//! The first level whose filtered hits are non-empty and whose top hit starts
//! with the typed name wins. The last planned level is accepted with any
//! non-empty result since there is nothing left to relax to.

use crate::config::{DEFAULT_MAX_RESULTS, SearchConfig};
use crate::filter::CandidateFilter;
use crate::search::{SearchError, SearchIndex, SearchQuery};
use run_types::Candidate;
use tracing::debug;

const EXE_SUFFIX: &str = ".exe";
const WILDCARD_EXE_SUFFIX: &str = "*.exe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Exact,
    Prefix,
    Relaxed,
}

impl Level {
    const ALL: [Level; 3] = [Level::Exact, Level::Prefix, Level::Relaxed];

    fn whole_word(self) -> bool {
        !matches!(self, Level::Relaxed)
    }

    fn suffix(self) -> &'static str {
        match self {
            Level::Exact => EXE_SUFFIX,
            Level::Prefix | Level::Relaxed => WILDCARD_EXE_SUFFIX,
        }
    }
}

/// One planned query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub level: Level,
    pub query: SearchQuery,
}

/// Lazily yield the attempts for `pattern`, most specific first
pub fn attempts(
    pattern: &str,
    whole_word: bool,
    max_results: usize,
) -> impl Iterator<Item = Attempt> + '_ {
    Level::ALL
        .into_iter()
        .filter(move |level| level.whole_word() || !whole_word)
        .map(move |level| Attempt {
            level,
            query: SearchQuery {
                pattern: search_pattern(pattern, level),
                whole_word: level.whole_word(),
                max_results,
            },
        })
}

/// Build the Everything search text for one level.
///
/// `C:\Tools\code` becomes `path:C:\Tools code.exe`, an AND of directory and
/// file name. A pattern already ending in `.exe` gets no suffix.
#[must_use]
pub fn search_pattern(pattern: &str, level: Level) -> String {
    let mut text = match pattern.rfind(['\\', '/']) {
        Some(pos) => format!("path:{} {}", &pattern[..pos], &pattern[pos + 1..]),
        None => pattern.to_string(),
    };
    if !ends_with_exe(&text) {
        text.push_str(level.suffix());
    }
    text
}

fn ends_with_exe(text: &str) -> bool {
    text.len() >= EXE_SUFFIX.len()
        && text
            .get(text.len() - EXE_SUFFIX.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(EXE_SUFFIX))
}

/// Whether `file_name` starts with the file-name part of the typed pattern.
///
/// Only the part after the last separator is compared, since hits carry a
/// bare file name and a `dir\name` pattern would never lead one. The
/// comparison ignores ASCII case because Everything matches
/// case-insensitively, so `CHROME` finds `chrome.exe` at the exact level.
/// Callers pass the top hit left after noise filtering; a prefetch trace or
/// manifest ranked first says nothing about the executable.
fn leads_with_pattern(file_name: &str, pattern: &str) -> bool {
    let base = pattern
        .rfind(['\\', '/'])
        .map_or(pattern, |pos| &pattern[pos + 1..]);
    file_name
        .get(..base.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(base))
}

/// Filtered hits of the level that satisfied the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    pub level: Level,
    /// Search text that produced the hits
    pub query: String,
    /// Non-noise hits in index order, never empty
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(Matches),
    /// No level produced a usable hit; carries the last search text tried
    NotFound { query: String },
}

/// Drives a [`SearchIndex`] through the relaxation levels
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    filter: CandidateFilter,
    max_results: usize,
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new(CandidateFilter::default(), DEFAULT_MAX_RESULTS)
    }
}

impl ResolutionEngine {
    #[must_use]
    pub fn new(filter: CandidateFilter, max_results: usize) -> Self {
        Self {
            filter,
            max_results,
        }
    }

    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(CandidateFilter::from_config(config), config.max_results)
    }

    /// Search for the executable named by `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the index's error as soon as any level fails to query.
    pub fn resolve<S: SearchIndex + ?Sized>(
        &self,
        index: &mut S,
        pattern: &str,
        whole_word: bool,
    ) -> Result<Resolution, SearchError> {
        let mut plan = attempts(pattern, whole_word, self.max_results).peekable();
        let mut last_query = String::new();

        while let Some(attempt) = plan.next() {
            let is_last = plan.peek().is_none();
            let hits = index.query(&attempt.query)?;
            let total = hits.len();
            let candidates = self.filter.retain(hits);
            debug!(
                "{:?} '{}': {} hits, {} after filtering",
                attempt.level,
                attempt.query.pattern,
                total,
                candidates.len()
            );

            let satisfied = candidates.first().is_some_and(|top| {
                is_last || leads_with_pattern(&top.file_name, pattern)
            });
            if satisfied {
                return Ok(Resolution::Found(Matches {
                    level: attempt.level,
                    query: attempt.query.pattern,
                    candidates,
                }));
            }
            last_query = attempt.query.pattern;
        }

        Ok(Resolution::NotFound { query: last_query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_levels() {
        assert_eq!(search_pattern("chrome", Level::Exact), "chrome.exe");
        assert_eq!(search_pattern("chrome", Level::Prefix), "chrome*.exe");
        assert_eq!(search_pattern("chrome", Level::Relaxed), "chrome*.exe");
    }

    #[test]
    fn test_search_pattern_does_not_double_exe() {
        assert_eq!(search_pattern("chrome.exe", Level::Exact), "chrome.exe");
        assert_eq!(search_pattern("chrome.exe", Level::Prefix), "chrome.exe");
        assert_eq!(search_pattern("Chrome.EXE", Level::Prefix), "Chrome.EXE");
    }

    #[test]
    fn test_search_pattern_with_directory() {
        assert_eq!(
            search_pattern(r"C:\Apps\chrome", Level::Exact),
            r"path:C:\Apps chrome.exe"
        );
        assert_eq!(
            search_pattern(r"C:\Program Files\code", Level::Prefix),
            r"path:C:\Program Files code*.exe"
        );
    }

    #[test]
    fn test_search_pattern_short_names() {
        assert_eq!(search_pattern("x", Level::Exact), "x.exe");
        assert_eq!(search_pattern("ёж", Level::Exact), "ёж.exe");
    }

    #[test]
    fn test_attempts_without_whole_word() {
        let levels: Vec<_> = attempts("code", false, 200).map(|a| a.level).collect();
        assert_eq!(levels, vec![Level::Exact, Level::Prefix, Level::Relaxed]);
    }

    #[test]
    fn test_attempts_with_whole_word_skip_relaxed() {
        let plan: Vec<_> = attempts("code", true, 50).collect();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|a| a.query.whole_word));
        assert!(plan.iter().all(|a| a.query.max_results == 50));
    }

    #[test]
    fn test_relaxed_attempt_drops_whole_word() {
        let relaxed = attempts("code", false, 200).last().unwrap();
        assert_eq!(relaxed.level, Level::Relaxed);
        assert!(!relaxed.query.whole_word);
        assert_eq!(relaxed.query.pattern, "code*.exe");
    }

    #[test]
    fn test_leads_with_pattern() {
        assert!(leads_with_pattern("chrome.exe", "chrome"));
        assert!(leads_with_pattern("Chrome.exe", "chrome"));
        assert!(leads_with_pattern("chrome.exe", r"C:\Apps\chrome"));
        assert!(!leads_with_pattern("googlechrome.exe", "chrome"));
        assert!(!leads_with_pattern("ch", "chrome"));
    }
}
