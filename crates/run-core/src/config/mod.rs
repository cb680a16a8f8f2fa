mod dirs;
mod settings;
mod validation;

pub use dirs::{CONFIG_FILE_NAME, Directories, FAVORITES_FILE_NAME};
pub use settings::{Config, DEFAULT_MAX_RESULTS, LaunchConfig, SearchConfig};
pub use validation::warn_unknown_fields;
