use std::fs;
use std::path::Path;

use anyhow::Context;
use sapper_core::{CellCount, Coord, RoundConfig, Session};
use serde::{Deserialize, Serialize};

/// Smallest stake the host accepts; lower inputs are raised to it.
pub const MIN_STAKE: f64 = 0.1;

/// Smallest board that fits a mine and a safe cell.
pub const MIN_GRID_SIZE: Coord = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid_size: Coord,
    pub mines: CellCount,
    pub stake: f64,
    pub balance: f64,
    pub user: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: RoundConfig::DEFAULT_GRID_SIZE,
            mines: RoundConfig::DEFAULT_MINE_COUNT,
            stake: RoundConfig::DEFAULT_STAKE,
            balance: Session::DEFAULT_BALANCE,
            user: None,
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub grid_size: Option<Coord>,
    pub mines: Option<CellCount>,
    pub stake: Option<f64>,
    pub balance: Option<f64>,
    pub user: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Defaults, then the optional settings file, then command-line overrides.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(overrides).sanitized())
    }

    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            grid_size: overrides.grid_size.unwrap_or(self.grid_size),
            mines: overrides.mines.unwrap_or(self.mines),
            stake: overrides.stake.unwrap_or(self.stake),
            balance: overrides.balance.unwrap_or(self.balance),
            user: overrides.user.or(self.user),
        }
    }

    /// Pulls every value into the range the game accepts.
    pub fn sanitized(self) -> Self {
        let grid_size = self.grid_size.max(MIN_GRID_SIZE);
        if grid_size != self.grid_size {
            log::warn!("Grid size {} too small, using {}", self.grid_size, grid_size);
        }
        let balance = if self.balance.is_finite() && self.balance >= 0.0 {
            self.balance
        } else {
            log::warn!("Ignoring invalid starting balance {}", self.balance);
            Session::DEFAULT_BALANCE
        };
        Self {
            grid_size,
            mines: clamp_mines(self.mines, grid_size),
            stake: sanitize_stake(self.stake),
            balance,
            user: self.user,
        }
    }

    pub fn round_config(&self) -> RoundConfig {
        RoundConfig::new_unchecked(self.grid_size, self.mines, self.stake)
    }
}

/// Raises stakes below [`MIN_STAKE`] to it; anything unparseable becomes the minimum.
pub fn sanitize_stake(stake: f64) -> f64 {
    if stake.is_finite() {
        stake.max(MIN_STAKE)
    } else {
        MIN_STAKE
    }
}

/// Keeps the mine count within `1..=grid_size² - 1`.
pub fn clamp_mines(mines: CellCount, grid_size: Coord) -> CellCount {
    mines.clamp(1, RoundConfig::max_mines(grid_size).max(1))
}
