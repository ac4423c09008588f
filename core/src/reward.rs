use crate::*;

/// Multiplier gained for each safe cell: `1 + mines / (2 * cells)`.
pub fn step_multiplier(grid_size: Coord, mine_count: CellCount) -> f64 {
    1.0 + f64::from(mine_count) / (2.0 * f64::from(square(grid_size)))
}

/// Total multiplier after `opened_safe` safe cells.
///
/// Accumulated one step at a time rather than with a power function so the
/// rounding matches a player tallying the steps.
pub fn multiplier(opened_safe: CellCount, config: &RoundConfig) -> f64 {
    let step = step_multiplier(config.grid_size, config.mine_count);
    (0..opened_safe).fold(1.0, |acc, _| acc * step)
}

/// Net winnings on top of the returned stake; zero before any safe cell is opened.
pub fn compute_reward(opened_safe: CellCount, config: &RoundConfig) -> f64 {
    config.stake * (multiplier(opened_safe, config) - 1.0)
}
