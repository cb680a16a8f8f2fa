//! Sequences one invocation: favorites fast path or search, selection, then
//! the terminal action.

use crate::favorites::FavoritesStore;
use crate::process::{ProcessSpawner, preserve_empty_args};
use crate::resolve::{Resolution, ResolutionEngine};
use crate::search::SearchIndex;
use crate::select;
use crate::{Error, Result};
use run_types::{ResolutionOutcome, ResolutionRequest};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// What to do with a single resolved path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Launch it and wait
    #[default]
    Run,
    /// Write it to stdout
    PrintPath,
    /// Store it as the favorite for the typed name
    SaveFavorite,
}

/// One invocation of the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListFavorites,
    DeleteFavorite {
        name: String,
    },
    /// Resolve a name; list mode is carried by the request
    Launch {
        request: ResolutionRequest,
        mode: Mode,
        /// Passed to the launched program untouched
        args: Vec<String>,
    },
}

/// Output streams. Results go to `out`, everything else to `err`.
pub struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }
}

pub struct Launcher<S, P> {
    favorites: FavoritesStore,
    index: S,
    spawner: P,
    engine: ResolutionEngine,
}

impl<S: SearchIndex, P: ProcessSpawner> Launcher<S, P> {
    pub fn new(favorites: FavoritesStore, index: S, spawner: P, engine: ResolutionEngine) -> Self {
        Self {
            favorites,
            index,
            spawner,
            engine,
        }
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Turn a request into a path, a listing, or not-found.
    ///
    /// # Errors
    ///
    /// Returns an error if the index fails or the chosen ordinal is invalid.
    pub fn resolve(&mut self, request: &ResolutionRequest) -> Result<ResolutionOutcome> {
        let favorite = self.favorites.lookup(&request.pattern);
        if let Some(path) = select::favorite_shortcut(request, favorite) {
            debug!("Using favorite for '{}': {path}", request.pattern);
            return Ok(ResolutionOutcome::Resolved(path.to_string()));
        }

        match self
            .engine
            .resolve(&mut self.index, &request.pattern, request.whole_word)?
        {
            Resolution::NotFound { query } => Ok(ResolutionOutcome::NotFound { query }),
            Resolution::Found(matches) => {
                debug!(
                    "Resolved '{}' at {:?} level with {} candidates",
                    request.pattern,
                    matches.level,
                    matches.candidates.len()
                );
                select::select(&matches.candidates, request, favorite)
            }
        }
    }

    /// Carry out `command`, returning the exit status to report.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the action could not complete; see
    /// [`Error::exit_code`] for its status.
    pub fn execute(&mut self, command: Command, console: &mut Console<'_>) -> Result<i32> {
        match command {
            Command::ListFavorites => self.list_favorites(console),
            Command::DeleteFavorite { name } => self.delete_favorite(&name, console),
            Command::Launch {
                request,
                mode,
                args,
            } => match self.resolve(&request)? {
                ResolutionOutcome::NotFound { query } => Err(Error::NotFound { query }),
                ResolutionOutcome::Ambiguous(entries) => {
                    for entry in &entries {
                        writeln!(console.out, "{entry}")?;
                    }
                    Ok(0)
                }
                ResolutionOutcome::Resolved(path) => {
                    self.act(&request.pattern, path, mode, &args, console)
                }
            },
        }
    }

    fn list_favorites(&self, console: &mut Console<'_>) -> Result<i32> {
        writeln!(console.err, "Run's favorites:")?;
        for favorite in self.favorites.list() {
            writeln!(
                console.err,
                "{} ==> {}",
                favorite.name, favorite.executable_path
            )?;
        }
        Ok(0)
    }

    fn delete_favorite(&mut self, name: &str, console: &mut Console<'_>) -> Result<i32> {
        let Some(removed) = self.favorites.delete(name)? else {
            return Err(Error::FavoriteNotFound(name.to_string()));
        };
        writeln!(
            console.err,
            "Deleted favorite program '{name}' ({})",
            removed.executable_path
        )?;
        Ok(0)
    }

    fn act(
        &mut self,
        pattern: &str,
        path: String,
        mode: Mode,
        args: &[String],
        console: &mut Console<'_>,
    ) -> Result<i32> {
        match mode {
            Mode::SaveFavorite => {
                let name = self.favorites.save(pattern, &path)?;
                writeln!(console.err, "Saved favorite '{name}' as: {path}")?;
                Ok(0)
            }
            Mode::PrintPath => {
                write!(console.out, "{path}")?;
                console.out.flush()?;
                Ok(0)
            }
            Mode::Run => {
                writeln!(console.err, "Running: {path}:")?;
                let args = preserve_empty_args(args);
                info!("Launching {path} with {} args", args.len());
                self.spawner
                    .spawn_and_wait(Path::new(&path), &args)
                    .map_err(|source| Error::Spawn { path, source })
            }
        }
    }
}
