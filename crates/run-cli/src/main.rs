//! run: start any program by typing part of its name
//!
//! The name is looked up in the favorites file first, then in the Everything
//! file index. The best match is started with the remaining arguments, and
//! its exit status becomes ours.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use run_core::config::{Config, Directories};
use run_core::process::SystemSpawner;
use run_core::search::EverythingCli;
use run_core::{
    Command, Console, FavoritesStore, Launcher, Mode, ResolutionEngine, ResolutionRequest,
};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_NO_ARGUMENTS: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Run any program by partial name
#[derive(Parser, Debug)]
#[command(name = "run")]
#[command(version, about, long_about = None)]
#[command(after_help = "\
Options end at PROGRAM; everything after it goes to the program unchanged.
Use -N (for example -2) to pick the Nth match.

Examples:
  run chrome                  Start the best match for chrome*.exe
  run -l code                 List the matches for code*.exe
  run -2 -s code              Save the second match as the 'code' favorite
  run -d code                 Forget the 'code' favorite
  run -p notepad              Print the path notepad resolves to
  run -w term --new-tab       Whole-word search, passing --new-tab along")]
struct Cli {
    /// Use the Nth match instead of the first
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pick: Option<u32>,

    /// Delete the favorite saved for PROGRAM
    #[arg(short = 'd')]
    delete: bool,

    /// List saved favorites
    #[arg(short = 'f')]
    favorites: bool,

    /// Wait for RETURN before exiting
    #[arg(short = 'k')]
    keep_open: bool,

    /// List the matches instead of running one
    #[arg(short = 'l')]
    list: bool,

    /// Print the resolved path instead of running it
    #[arg(short = 'p')]
    print_path: bool,

    /// Save the selected match as the favorite for PROGRAM
    #[arg(short = 's')]
    save: bool,

    /// Match whole words only
    #[arg(short = 'w')]
    whole_word: bool,

    /// Name, partial name, wildcard pattern or `dir\name` of the program
    program: Option<String>,

    /// Arguments for the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum UsageError {
    #[error("Missing program to {0}")]
    MissingProgram(&'static str),

    #[error("Cannot save a favorite program without selecting one")]
    SaveWithoutSelection,
}

impl UsageError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::MissingProgram(_) => EXIT_NO_ARGUMENTS,
            Self::SaveWithoutSelection => EXIT_USAGE,
        }
    }
}

impl Cli {
    fn into_command(self) -> std::result::Result<Command, UsageError> {
        if self.favorites {
            return Ok(Command::ListFavorites);
        }

        let verb = if self.delete { "delete" } else { "run" };
        let Some(program) = self.program.filter(|p| !p.is_empty()) else {
            return Err(UsageError::MissingProgram(verb));
        };

        if self.delete {
            return Ok(Command::DeleteFavorite { name: program });
        }
        if self.save && self.pick.is_none() {
            return Err(UsageError::SaveWithoutSelection);
        }

        let mode = if self.save {
            Mode::SaveFavorite
        } else if self.print_path {
            Mode::PrintPath
        } else {
            Mode::Run
        };

        Ok(Command::Launch {
            request: ResolutionRequest {
                whole_word: self.whole_word,
                chosen_option: self.pick.unwrap_or(0),
                list_only: self.list,
                ..ResolutionRequest::new(program)
            },
            mode,
            args: self.args,
        })
    }
}

/// Rewrite the raw command line into something clap can parse.
///
/// Option parsing stops at the first argument that is not an option, which
/// is fenced off with `--` so the program's own flags reach it untouched.
/// Numeric options such as `-2` become `--pick 2`.
fn normalize_args(raw: Vec<String>) -> Vec<String> {
    let mut raw = raw.into_iter();
    let mut normalized: Vec<String> = raw.next().into_iter().collect();

    while let Some(arg) = raw.next() {
        if arg == "--" || !arg.starts_with('-') || arg.len() < 2 {
            normalized.push("--".to_string());
            if arg != "--" {
                normalized.push(arg);
            }
            normalized.extend(raw);
            break;
        }
        if arg == "--pick" {
            normalized.push(arg);
            normalized.extend(raw.next());
            continue;
        }
        if arg.starts_with("--") {
            normalized.push(arg);
            continue;
        }
        split_short_options(&arg[1..], &mut normalized);
    }
    normalized
}

/// Expand a cluster such as `l2w` into `-l --pick 2 -w`
fn split_short_options(cluster: &str, out: &mut Vec<String>) {
    let mut letters = String::new();
    let mut digits = String::new();
    let flush_letters = |letters: &mut String, out: &mut Vec<String>| {
        if !letters.is_empty() {
            out.push(format!("-{letters}"));
            letters.clear();
        }
    };
    let flush_digits = |digits: &mut String, out: &mut Vec<String>| {
        if !digits.is_empty() {
            out.push("--pick".to_string());
            out.push(std::mem::take(digits));
        }
    };

    for ch in cluster.chars() {
        if ch.is_ascii_digit() {
            flush_letters(&mut letters, out);
            digits.push(ch);
        } else {
            flush_digits(&mut digits, out);
            letters.push(ch);
        }
    }
    flush_letters(&mut letters, out);
    flush_digits(&mut digits, out);
}

/// Set up logging.
///
/// Stderr only shows warnings unless `RUST_LOG` says otherwise. Debug builds
/// also log everything to a timestamped file in the temp directory.
fn setup_logging() {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("run=warn"));

    if cfg!(debug_assertions) {
        let temp_dir = std::env::temp_dir();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("run-{timestamp}.log");

        let file_appender = tracing_appender::rolling::never(&temp_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new("run=debug"));

        let stderr_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_filter(stderr_filter);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .init();

        debug!("Logging to {}", temp_dir.join(&log_filename).display());
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .with_filter(stderr_filter),
            )
            .init();
    }
}

fn print_help_to_stderr() {
    let help = Cli::command().render_help();
    eprintln!("{help}");
}

fn wait_for_return() -> Result<()> {
    eprint!("\nHit RETURN to continue...");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(())
}

fn run() -> Result<i32> {
    let raw: Vec<String> = std::env::args().collect();
    if raw.len() < 2 {
        print_help_to_stderr();
        return Ok(EXIT_NO_ARGUMENTS);
    }

    setup_logging();

    let cli = match Cli::try_parse_from(normalize_args(raw)) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    let keep_open = cli.keep_open;
    let command = match cli.into_command() {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{usage}\n");
            print_help_to_stderr();
            return Ok(usage.exit_code());
        }
    };

    let dirs = Directories::new();
    let config = Config::load(&dirs.config_file).unwrap_or_else(|err| {
        warn!("Ignoring {}: {err}", dirs.config_file.display());
        Config::default()
    });
    let pause = matches!(command, Command::Launch { .. })
        && (keep_open || config.launch.pause_after_run);

    let favorites = FavoritesStore::load(&dirs.favorites_file);
    let index = EverythingCli::from_config(&config.search, &dirs);
    debug!("Searching through {}", index.program().display());
    let engine = ResolutionEngine::from_config(&config.search);
    let mut launcher = Launcher::new(favorites, index, SystemSpawner, engine);

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let code = match launcher.execute(command, &mut Console::new(&mut stdout, &mut stderr)) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    };

    Ok(finish(code, pause.then_some(wait_for_return)))
}

/// Run the pause, if any, without letting it replace the exit status
fn finish(code: i32, pause: Option<impl FnOnce() -> Result<()>>) -> i32 {
    if let Some(pause) = pause
        && let Err(err) = pause()
    {
        warn!("Pause failed: {err:#}");
    }
    code
}

fn main() {
    let code = run().unwrap_or_else(|err| {
        eprintln!("{err:#}");
        1
    });
    std::process::exit(code);
}
