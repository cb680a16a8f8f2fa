use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default number of hits requested from the index per query
pub const DEFAULT_MAX_RESULTS: usize = 200;

const MAX_RESULTS_LIMIT: usize = 10_000;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub launch: LaunchConfig,
}

impl Config {
    /// Load config from file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "run.json");
        let mut config: Self = serde_json::from_str(&content)?;
        config.search.clamp_max_results();
        Ok(config)
    }
}

/// How the Everything index is queried and filtered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Hits requested per query
    pub max_results: usize,

    /// Everything command-line client
    pub es_path: PathBuf,

    /// Named Everything instance, if not the default one
    pub instance: Option<String>,

    /// File name suffixes hidden in addition to the built-in list
    pub extra_noise_suffixes: Vec<String>,

    /// Directory fragments hidden in addition to the built-in list
    pub extra_noise_dirs: Vec<String>,
}

impl SearchConfig {
    fn clamp_max_results(&mut self) {
        let clamped = self.max_results.clamp(1, MAX_RESULTS_LIMIT);
        if clamped != self.max_results {
            warn!(
                "search.maxResults {} out of range, using {}",
                self.max_results, clamped
            );
            self.max_results = clamped;
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            es_path: PathBuf::from("es.exe"),
            instance: None,
            extra_noise_suffixes: Vec::new(),
            extra_noise_dirs: Vec::new(),
        }
    }
}

/// Launch behaviour defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchConfig {
    /// Wait for RETURN after every run, as if `-k` was given
    pub pause_after_run: bool,
}
