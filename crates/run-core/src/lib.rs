pub mod config;
pub mod favorites;
pub mod filter;
pub mod launcher;
pub mod process;
pub mod resolve;
pub mod search;
pub mod select;

mod error;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use favorites::FavoritesStore;
pub use filter::CandidateFilter;
pub use launcher::{Command, Console, Launcher, Mode};
pub use resolve::ResolutionEngine;

pub use run_types::*;
