//! Hides index hits that are never the program the user meant: prefetch
//! traces, resource and manifest files, build output, side-by-side caches
//! and recycle-bin copies.

use crate::config::SearchConfig;
use run_types::Candidate;

const NOISE_SUFFIXES: [&str; 5] = [".pf", ".mui", ".res", ".manifest", ".config"];

const NOISE_DIR_FRAGMENTS: [&str; 4] = [
    r"\obj\",
    r"Windows\servicing\",
    r"Windows\WinSxS\",
    r"\$Recycle.Bin\",
];

const PREFETCH_DIR_SUFFIX: &str = r"\Prefetch";

/// Built-in noise rules. Suffix matching is case-sensitive.
#[must_use]
pub fn is_noise(file_name: &str, directory_path: &str) -> bool {
    NOISE_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
        || NOISE_DIR_FRAGMENTS
            .iter()
            .any(|fragment| directory_path.contains(fragment))
        || directory_path.ends_with(PREFETCH_DIR_SUFFIX)
}

/// Noise predicate: the built-in rules plus any configured extras
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    extra_suffixes: Vec<String>,
    extra_dir_fragments: Vec<String>,
}

impl CandidateFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_extras(extra_suffixes: Vec<String>, extra_dir_fragments: Vec<String>) -> Self {
        Self {
            extra_suffixes: extra_suffixes.into_iter().filter(|s| !s.is_empty()).collect(),
            extra_dir_fragments: extra_dir_fragments
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::with_extras(
            config.extra_noise_suffixes.clone(),
            config.extra_noise_dirs.clone(),
        )
    }

    #[must_use]
    pub fn is_noise(&self, candidate: &Candidate) -> bool {
        is_noise(&candidate.file_name, &candidate.directory_path)
            || self
                .extra_suffixes
                .iter()
                .any(|suffix| candidate.file_name.ends_with(suffix.as_str()))
            || self
                .extra_dir_fragments
                .iter()
                .any(|fragment| candidate.directory_path.contains(fragment.as_str()))
    }

    /// Drop noise, keeping the index's order for everything else
    #[must_use]
    pub fn retain(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| !self.is_noise(candidate))
            .collect()
    }
}
