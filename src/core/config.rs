//! Game configuration types.
//!
//! - `Theme`: the stage sequence a match progresses through
//! - `GameConfig`: board size, team size, stages, recruit levels and seed
//!
//! Hosts usually take `GameConfig::default()` and adjust it with the
//! `with_*` builders; the config is serde-friendly so it can also be read
//! from a file.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Visual context of a stage. The level number indexes into the
/// configured stage list to select it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Prairie,
    Desert,
    Arctic,
    Mountain,
}

impl Theme {
    /// Default stage order.
    pub const ALL: [Theme; 4] = [Theme::Prairie, Theme::Desert, Theme::Arctic, Theme::Mountain];
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Theme::Prairie => "prairie",
            Theme::Desert => "desert",
            Theme::Arctic => "arctic",
            Theme::Mountain => "mountain",
        };
        f.write_str(name)
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: usize,

    /// Units per side at the start of each level.
    /// Also the maximum team size.
    pub initial_unit_count: usize,

    /// Stage themes in play order. Passing the last stage ends the game.
    pub stages: Vec<Theme>,

    /// Generated units get a level drawn from `1..=recruit_max_level`.
    pub recruit_max_level: u32,

    /// Seed for unit generation and placement.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            initial_unit_count: 4,
            stages: Theme::ALL.to_vec(),
            recruit_max_level: 1,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the board size.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the number of units per side.
    #[must_use]
    pub fn with_initial_unit_count(mut self, count: usize) -> Self {
        self.initial_unit_count = count;
        self
    }

    /// Replace the stage list.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<Theme>) -> Self {
        self.stages = stages;
        self
    }

    /// Set the highest level a generated unit can have.
    #[must_use]
    pub fn with_recruit_max_level(mut self, level: u32) -> Self {
        self.recruit_max_level = level;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of stages, i.e. the last playable level.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Theme for a 1-based level, if the level is playable.
    #[must_use]
    pub fn theme_for_level(&self, level: u32) -> Option<Theme> {
        let index = usize::try_from(level).ok()?.checked_sub(1)?;
        self.stages.get(index).copied()
    }

    /// Check that a match can actually be set up with this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 4 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        // Two spawn columns per side.
        let capacity = 2 * self.board_size;
        if self.initial_unit_count == 0 || self.initial_unit_count > capacity {
            return Err(ConfigError::UnitCount {
                count: self.initial_unit_count,
                capacity,
            });
        }
        if self.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }
        if self.recruit_max_level == 0 {
            return Err(ConfigError::RecruitLevel);
        }
        Ok(())
    }
}
