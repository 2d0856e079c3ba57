//! Save/load contract on top of a key-value store.
//!
//! Two independent records are kept:
//! - `"state"`: the whole match as a bincode-encoded `SavedGame`
//! - `"hi-score"`: the best score ever reached, a bincode-encoded `u64`
//!
//! The hi score survives new games and failed loads; a missing or corrupt
//! hi score reads as zero.

use tracing::{debug, warn};

use super::store::KeyValueStore;
use crate::core::SavedGame;
use crate::error::PersistenceError;

/// Key the match state is stored under.
pub const STATE_KEY: &str = "state";

/// Key the best score is stored under.
pub const HI_SCORE_KEY: &str = "hi-score";

/// Persists match state and the hi score.
#[derive(Clone, Debug, Default)]
pub struct StateService<S> {
    store: S,
}

impl<S: KeyValueStore> StateService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Write the match state, replacing any earlier save.
    pub fn save(&mut self, game: &SavedGame) -> Result<(), PersistenceError> {
        let bytes = bincode::serialize(game).map_err(PersistenceError::Encode)?;
        debug!(bytes = bytes.len(), level = game.current_level, "saving state");
        self.store.set(STATE_KEY, bytes);
        Ok(())
    }

    /// Read the last saved match state.
    pub fn load(&self) -> Result<SavedGame, PersistenceError> {
        let bytes = self.store.get(STATE_KEY).ok_or(PersistenceError::NoSavedGame)?;
        bincode::deserialize(&bytes).map_err(PersistenceError::Decode)
    }

    /// Best score so far, or zero if none is stored or it cannot be read.
    pub fn load_hi_score(&self) -> u64 {
        let Some(bytes) = self.store.get(HI_SCORE_KEY) else {
            return 0;
        };
        match bincode::deserialize(&bytes) {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "unreadable hi score, treating as 0");
                0
            }
        }
    }

    pub fn save_hi_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        let bytes = bincode::serialize(&score).map_err(PersistenceError::Encode)?;
        self.store.set(HI_SCORE_KEY, bytes);
        Ok(())
    }
}
