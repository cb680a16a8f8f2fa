use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Literal stand-in for an empty argument
pub const EMPTY_ARGUMENT: &str = "\"\"";

/// Starts a program and blocks until it exits
pub trait ProcessSpawner {
    /// Run `program` with `args`, inheriting environment and standard streams.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started.
    fn spawn_and_wait(&mut self, program: &Path, args: &[String]) -> std::io::Result<i32>;
}

impl<T: ProcessSpawner + ?Sized> ProcessSpawner for &mut T {
    fn spawn_and_wait(&mut self, program: &Path, args: &[String]) -> std::io::Result<i32> {
        (**self).spawn_and_wait(program, args)
    }
}

/// Spawns real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn_and_wait(&mut self, program: &Path, args: &[String]) -> std::io::Result<i32> {
        debug!("Spawning {} with {} args", program.display(), args.len());
        let status = Command::new(program).args(args).status()?;

        Ok(status.code().unwrap_or_else(|| {
            warn!("{} terminated without exit status", program.display());
            1
        }))
    }
}

/// Replace empty arguments with an explicit `""` so they reach the child
#[must_use]
pub fn preserve_empty_args(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            if arg.is_empty() {
                EMPTY_ARGUMENT.to_string()
            } else {
                arg.clone()
            }
        })
        .collect()
}
