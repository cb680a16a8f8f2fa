//! Test module for run-core
//!
//! This module contains scenario tests for:
//! - Relaxation order and the top-hit prefix rule
//! - Selection over filtered candidates
//! - Favorites persistence on disk
//! - Launcher actions end to end against fake collaborators
//! - Configuration loading and defaults

mod favorites_tests;
