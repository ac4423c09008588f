#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reward::*;
pub use rng::*;
pub use round::*;
pub use seed::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod reward;
mod rng;
mod round;
mod seed;
mod session;
mod types;

/// Parameters fixed for the whole of one round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub grid_size: Coord,
    pub mine_count: CellCount,
    pub stake: f64,
}

impl RoundConfig {
    pub const DEFAULT_GRID_SIZE: Coord = 5;
    pub const DEFAULT_MINE_COUNT: CellCount = 5;
    pub const DEFAULT_STAKE: f64 = 1.0;

    pub const fn new_unchecked(grid_size: Coord, mine_count: CellCount, stake: f64) -> Self {
        Self {
            grid_size,
            mine_count,
            stake,
        }
    }

    pub fn new(grid_size: Coord, mine_count: CellCount, stake: f64) -> Result<Self> {
        let config = Self::new_unchecked(grid_size, mine_count, stake);
        config.validate()?;
        Ok(config)
    }

    /// Checks the board layout (see [`validate_layout`]) and that the stake is positive.
    pub fn validate(&self) -> Result<()> {
        validate_layout(self.grid_size, self.mine_count)?;
        if !(self.stake.is_finite() && self.stake > 0.0) {
            return Err(ConfigIssue::InvalidStake.into());
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.grid_size)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    /// Largest mine count a board of this side accepts.
    pub const fn max_mines(grid_size: Coord) -> CellCount {
        square(grid_size).saturating_sub(1)
    }
}

/// Checks `0 < mine_count < grid_size²`.
///
/// Mine placement only terminates for layouts that pass this check.
pub fn validate_layout(grid_size: Coord, mine_count: CellCount) -> Result<()> {
    if grid_size == 0 {
        return Err(ConfigIssue::EmptyGrid.into());
    }
    if mine_count == 0 {
        return Err(ConfigIssue::NoMines.into());
    }
    if mine_count >= square(grid_size) {
        return Err(ConfigIssue::TooManyMines.into());
    }
    Ok(())
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::DEFAULT_GRID_SIZE,
            Self::DEFAULT_MINE_COUNT,
            Self::DEFAULT_STAKE,
        )
    }
}
