use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Favorites file name, kept next to the binary
pub const FAVORITES_FILE_NAME: &str = "run.fav";

/// Optional settings file name, kept next to the binary
pub const CONFIG_FILE_NAME: &str = "run.json";

/// Locations of the files `run` reads and writes
#[derive(Debug, Clone)]
pub struct Directories {
    /// Directory holding the binary and its side files
    pub base: PathBuf,

    /// Favorites file (`run.fav`)
    pub favorites_file: PathBuf,

    /// Settings file (`run.json`)
    pub config_file: PathBuf,
}

impl Directories {
    /// Resolve paths relative to the running binary.
    ///
    /// Falls back to the platform data directory when the binary location
    /// cannot be determined.
    #[must_use]
    pub fn new() -> Self {
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(Self::fallback_base);
        Self::with_base(base)
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            favorites_file: base.join(FAVORITES_FILE_NAME),
            config_file: base.join(CONFIG_FILE_NAME),
            base,
        }
    }

    fn fallback_base() -> PathBuf {
        if let Some(project) = ProjectDirs::from("", "", "run") {
            debug!(
                "Binary location unknown, using {}",
                project.data_dir().display()
            );
            return project.data_dir().to_path_buf();
        }
        PathBuf::from(".")
    }

    /// Find a helper program, preferring a copy that sits next to the binary.
    ///
    /// Absolute paths are returned untouched; bare names fall back to a PATH
    /// lookup when no sibling exists.
    #[must_use]
    pub fn locate_program(&self, program: &Path) -> PathBuf {
        if program.is_relative() {
            let sibling = self.base.join(program);
            if sibling.exists() {
                return sibling;
            }
        }
        program.to_path_buf()
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}
