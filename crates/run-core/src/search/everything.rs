use super::{SearchError, SearchIndex, SearchQuery};
use crate::config::{Directories, SearchConfig};
use run_types::Candidate;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Queries a running Everything service through its `es.exe` client.
///
/// `es.exe` prints one full path per line in Everything's ranking order and
/// reports failures through its exit status.
#[derive(Debug, Clone)]
pub struct EverythingCli {
    program: PathBuf,
    instance: Option<String>,
}

impl EverythingCli {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            instance: None,
        }
    }

    #[must_use]
    pub fn with_instance(mut self, instance: Option<String>) -> Self {
        self.instance = instance.filter(|name| !name.is_empty());
        self
    }

    #[must_use]
    pub fn from_config(config: &SearchConfig, dirs: &Directories) -> Self {
        Self::new(dirs.locate_program(&config.es_path)).with_instance(config.instance.clone())
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command line for one query.
    ///
    /// Search terms are passed as separate arguments so Everything ANDs them,
    /// the same as a space-separated search string.
    fn arguments(&self, query: &SearchQuery) -> Vec<String> {
        let mut args = vec!["-n".to_string(), query.max_results.to_string()];
        if query.whole_word {
            args.push("-w".to_string());
        }
        if let Some(instance) = &self.instance {
            args.push("-instance".to_string());
            args.push(instance.clone());
        }
        args.extend(query.pattern.split_whitespace().map(str::to_string));
        args
    }
}

impl SearchIndex for EverythingCli {
    fn query(&mut self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError> {
        let args = self.arguments(query);
        debug!("{} {}", self.program.display(), args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| SearchError::ClientUnavailable {
                program: self.program.clone(),
                source,
            })?;

        let Some(code) = output.status.code() else {
            warn!("{} terminated without exit status", self.program.display());
            return Err(SearchError::Unknown(-1));
        };

        if let Some(error) = SearchError::from_exit_code(code) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("es exited with {code}: {}", stderr.trim());
            return Err(error);
        }

        let mut candidates = parse_output(&String::from_utf8_lossy(&output.stdout));
        candidates.truncate(query.max_results);
        debug!("{} hits for '{}'", candidates.len(), query.pattern);
        Ok(candidates)
    }
}

/// Turn `es.exe` output (one full path per line) into candidates
#[must_use]
pub fn parse_output(stdout: &str) -> Vec<Candidate> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(Candidate::from_full_path)
        .collect()
}
