// src/progression.rs

//! Level progression machine. Loads the catalog and the user's saved
//! progress together, owns the active board, and persists completions to
//! the backend as detached best-effort saves.

use crate::board::Board;
use crate::client::ApiClient;
use crate::error::GameError;
use crate::level;
use crate::models::{Coord, Level};
use log::{info, warn};

/// Where the game currently stands. The loading state is the pending
/// [`Game::load`] future; a failed load is its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing { index: usize },
    Complete,
    /// The computed level index has no catalog entry (e.g. the catalog
    /// shrank since the progress record was written). Recoverable only
    /// through [`Game::restart`].
    MissingLevel { index: usize },
}

#[derive(Debug)]
pub struct Game {
    client: ApiClient,
    user_id: String,
    levels: Vec<Level>,
    phase: Phase,
    board: Option<Board>,
}

impl Game {
    /// Fetches the level catalog and the user's progress concurrently and
    /// resumes where the user left off. Either fetch failing fails the
    /// whole load; callers show a retry screen and call `load` again.
    ///
    /// Malformed catalog entries are dropped with a warning rather than
    /// failing the rest of the catalog.
    pub async fn load(client: ApiClient, user_id: String) -> Result<Self, GameError> {
        let (levels, progress) =
            tokio::try_join!(client.fetch_levels(), client.fetch_progress(&user_id))?;

        let levels: Vec<Level> = levels
            .into_iter()
            .filter(|l| match level::validate(l) {
                Ok(()) => true,
                Err(e) => {
                    warn!("[Progress] Dropping catalog entry: {e}");
                    false
                }
            })
            .collect();

        let start = progress.last_completed_level;
        info!(
            "[Progress] Loaded {} levels for {user_id}, resuming at index {start}",
            levels.len()
        );

        let mut game = Game {
            client,
            user_id,
            levels,
            phase: Phase::Complete,
            board: None,
        };
        if start >= game.levels.len() && !game.levels.is_empty() {
            game.phase = Phase::Complete;
        } else {
            game.enter_playing(start);
        }
        Ok(game)
    }

    // --- Renderer Intents ---

    /// Places the given pool unit into a blank of the active board.
    /// Returns `true` when the placement solved the level; the caller is
    /// then expected to invoke [`Game::advance_level`].
    pub fn place(&mut self, coord: Coord, unit_id: &str) -> Result<bool, GameError> {
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| GameError::InvalidPlacement("no level is active".to_string()))?;
        board.place_unit(coord, unit_id)?;
        Ok(board.is_solved())
    }

    /// Removes the number from a filled blank of the active board.
    pub fn remove(&mut self, coord: Coord) -> Result<(), GameError> {
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| GameError::InvalidRemoval("no level is active".to_string()))?;
        board.remove(coord)
    }

    // --- Transitions ---

    /// Consumes a solved board: kicks off a detached progress save and
    /// moves to the next level, or to [`Phase::Complete`] after the last
    /// one. Returns `false` (and does nothing) when the active board is
    /// not solved.
    ///
    /// Must run inside a Tokio runtime; the save is spawned, not awaited.
    pub fn advance_level(&mut self) -> bool {
        let Phase::Playing { index } = self.phase else {
            return false;
        };
        if !self.board.as_ref().is_some_and(Board::is_solved) {
            return false;
        }

        let next = index + 1;
        self.save_detached(next);
        if next < self.levels.len() {
            self.enter_playing(next);
        } else {
            info!("[Progress] All {} levels complete", self.levels.len());
            self.board = None;
            self.phase = Phase::Complete;
        }
        true
    }

    /// From the finished or stalled states, resets progress to level 0
    /// (detached save, same best-effort policy) and starts over. Ignored
    /// mid-level.
    pub fn restart(&mut self) -> bool {
        match self.phase {
            Phase::Complete | Phase::MissingLevel { .. } => {
                self.save_detached(0);
                self.enter_playing(0);
                true
            }
            Phase::Playing { .. } => {
                warn!("[Progress] Restart ignored while a level is active");
                false
            }
        }
    }

    fn enter_playing(&mut self, index: usize) {
        let Some(level) = self.levels.get(index) else {
            warn!("[Progress] No catalog entry at index {index}");
            self.board = None;
            self.phase = Phase::MissingLevel { index };
            return;
        };
        match Board::new(level) {
            Ok(board) => {
                info!("[Progress] Starting level index {index}: {}", level.name);
                self.board = Some(board);
                self.phase = Phase::Playing { index };
            }
            Err(e) => {
                warn!("[Progress] Cannot start level index {index}: {e}");
                self.board = None;
                self.phase = Phase::MissingLevel { index };
            }
        }
    }

    // Fire-and-forget by contract: completion must not wait on the
    // network, a failed save is only logged, and overlapping saves have
    // no ordering guarantee (the server keeps the last write).
    fn save_detached(&self, last_completed_level: usize) {
        let client = self.client.clone();
        let user_id = self.user_id.clone();
        let _detached = tokio::spawn(async move {
            if let Err(e) = client.save_progress(&user_id, last_completed_level).await {
                warn!("[Progress] Save failed, gameplay continues: {e}");
            }
        });
    }

    // --- Reads ---

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn current_level(&self) -> Option<&Level> {
        match self.phase {
            Phase::Playing { index } => self.levels.get(index),
            _ => None,
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
