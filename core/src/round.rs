use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Active
/// - Active -> Lost
/// - Active -> WonAllSafe
/// - Active -> CashedOut
/// - any finished state -> Active (by starting a new round)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// No round has been started yet
    Idle,
    Active,
    /// Opened a mine, the stake is gone
    Lost,
    /// Every safe cell was opened
    WonAllSafe,
    /// Player took the reward before clearing the board
    CashedOut,
}

impl RoundState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::WonAllSafe | Self::CashedOut)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenOutcome {
    Continue,
    Lost,
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenResult {
    /// The opened cell, after it was revealed
    pub cell: Cell,
    pub outcome: OpenOutcome,
    /// Set only when the round was won by this move
    pub reward: Option<f64>,
}

/// One play-through from stake deduction to a terminal outcome.
///
/// Balance bookkeeping lives in [`Session`]; a round only reports rewards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    config: RoundConfig,
    seed: String,
    grid: Grid,
    state: RoundState,
    opened_safe_count: CellCount,
    triggered_mine: Option<Coord2>,
    reward: Option<f64>,
}

impl Round {
    /// Starts a round on the board generated from `seed`.
    pub fn new(config: RoundConfig, seed: impl Into<String>) -> Result<Self> {
        config.validate()?;
        let seed = seed.into();
        let grid = generate_grid(config.grid_size, config.mine_count, &seed)?;
        Ok(Self::start(config, seed, grid))
    }

    /// Starts a round on a prepared board; grid size and mine count come from the board.
    pub fn with_grid(stake: f64, seed: impl Into<String>, grid: Grid) -> Result<Self> {
        let config = RoundConfig::new(grid.size(), grid.mine_count(), stake)?;
        Ok(Self::start(config, seed.into(), grid))
    }

    fn start(config: RoundConfig, seed: String, grid: Grid) -> Self {
        log::debug!(
            "Round started: {}x{} with {} mines, stake {}, seed {:?}",
            config.grid_size,
            config.grid_size,
            config.mine_count,
            config.stake,
            seed
        );
        Self {
            config,
            seed,
            grid,
            state: RoundState::Active,
            opened_safe_count: 0,
            triggered_mine: None,
            reward: None,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Reward paid out when the round ended, if it ended with one.
    pub fn reward(&self) -> Option<f64> {
        self.reward
    }

    /// What cashing out right now would pay.
    pub fn current_reward(&self) -> f64 {
        compute_reward(self.opened_safe_count, &self.config)
    }

    pub fn current_multiplier(&self) -> f64 {
        multiplier(self.opened_safe_count, &self.config)
    }

    pub fn can_cash_out(&self) -> bool {
        self.state.is_active() && self.opened_safe_count > 0
    }

    pub fn open_cell(&mut self, coords: Coord2) -> Result<OpenResult> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_active()?;

        if self.grid[coords].is_open {
            return Err(NoOpReason::AlreadyOpen.into());
        }

        let cell = self.grid.open(coords);
        if cell.is_mine {
            log::debug!("Mine at {:?}, round lost", coords);
            self.triggered_mine = Some(coords);
            self.end_round(RoundState::Lost);
            return Ok(OpenResult {
                cell,
                outcome: OpenOutcome::Lost,
                reward: None,
            });
        }

        self.opened_safe_count += 1;
        log::debug!(
            "Opened safe cell at {:?} ({} adjacent), {} of {} safe cells",
            coords,
            cell.adjacent_mines,
            self.opened_safe_count,
            self.grid.safe_cell_count()
        );

        if self.opened_safe_count == self.grid.safe_cell_count() {
            let reward = self.current_reward();
            self.reward = Some(reward);
            self.end_round(RoundState::WonAllSafe);
            Ok(OpenResult {
                cell,
                outcome: OpenOutcome::Won,
                reward: Some(reward),
            })
        } else {
            Ok(OpenResult {
                cell,
                outcome: OpenOutcome::Continue,
                reward: None,
            })
        }
    }

    /// Ends the round with the reward earned so far.
    pub fn cash_out(&mut self) -> Result<f64> {
        self.check_active()?;
        if self.opened_safe_count == 0 {
            return Err(NoOpReason::NothingToCashOut.into());
        }

        let reward = self.current_reward();
        self.reward = Some(reward);
        self.end_round(RoundState::CashedOut);
        Ok(reward)
    }

    /// Gives up an active round without a reward.
    pub fn forfeit(&mut self) -> Result<()> {
        self.check_active()?;
        self.end_round(RoundState::Lost);
        Ok(())
    }

    fn end_round(&mut self, state: RoundState) {
        debug_assert!(state.is_finished());
        if self.state.is_finished() {
            return;
        }
        self.state = state;
        self.grid.open_all();
        log::debug!(
            "Round ended: {:?} after {} safe cells, reward {:?}",
            state,
            self.opened_safe_count,
            self.reward
        );
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(NoOpReason::NotActive.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const SCENARIO_SEED: &str = "uid:1|t:0|b:5|s:1";

    fn round(size: Coord, mines: &[Coord2]) -> Round {
        let grid = Grid::from_mine_coords(size, mines).unwrap();
        Round::with_grid(1.0, "test", grid).unwrap()
    }

    fn safe_cells(round: &Round) -> Vec<Coord2> {
        round
            .grid()
            .indexed_cells()
            .filter(|(_, cell)| cell.is_safe())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn new_round_is_active_and_hidden() {
        let round = Round::new(RoundConfig::default(), SCENARIO_SEED).unwrap();

        assert_eq!(round.state(), RoundState::Active);
        assert_eq!(round.opened_safe_count(), 0);
        assert_eq!(round.grid().opened_count(), 0);
        assert_eq!(round.seed(), SCENARIO_SEED);
    }

    #[test]
    fn opening_mine_loses_and_reveals_everything() {
        let mut round = round(3, &[(0, 0)]);

        let result = round.open_cell((0, 0)).unwrap();

        assert_eq!(result.outcome, OpenOutcome::Lost);
        assert!(result.cell.is_mine);
        assert_eq!(result.reward, None);
        assert_eq!(round.state(), RoundState::Lost);
        assert_eq!(round.triggered_mine(), Some((0, 0)));
        assert_eq!(round.grid().opened_count(), 9);
        assert_eq!(round.reward(), None);
    }

    #[test]
    fn opening_safe_cell_reveals_only_that_cell() {
        let mut round = round(3, &[(0, 0)]);

        let result = round.open_cell((2, 2)).unwrap();

        assert_eq!(result.outcome, OpenOutcome::Continue);
        assert_eq!(result.cell.view(), CellView::Safe(0));
        assert_eq!(round.opened_safe_count(), 1);
        assert_eq!(round.grid().opened_count(), 1);
    }

    #[test]
    fn opening_twice_is_a_no_op() {
        let mut round = round(3, &[(0, 0)]);

        round.open_cell((1, 1)).unwrap();
        let before = round.clone();
        let again = round.open_cell((1, 1));

        assert_eq!(again, Err(GameError::NoOp(NoOpReason::AlreadyOpen)));
        assert!(again.unwrap_err().is_no_op());
        assert_eq!(round, before);
        assert_eq!(round.opened_safe_count(), 1);
    }

    #[test]
    fn clearing_scenario_board_wins() {
        let mut round = Round::new(RoundConfig::default(), SCENARIO_SEED).unwrap();
        let safe = safe_cells(&round);
        assert_eq!(safe.len(), 20);

        let (last, rest) = safe.split_last().unwrap();
        for &coords in rest {
            assert_eq!(
                round.open_cell(coords).unwrap().outcome,
                OpenOutcome::Continue
            );
        }
        let result = round.open_cell(*last).unwrap();

        assert_eq!(result.outcome, OpenOutcome::Won);
        assert_eq!(round.state(), RoundState::WonAllSafe);
        let reward = result.reward.unwrap();
        assert!((reward - 5.7275).abs() < 1e-4, "reward {reward}");
        assert_eq!(round.reward(), Some(reward));
        assert_eq!(round.grid().opened_count(), 25);
    }

    #[test]
    fn cash_out_requires_a_safe_step() {
        let mut round = round(3, &[(0, 0)]);

        assert_eq!(
            round.cash_out(),
            Err(GameError::NoOp(NoOpReason::NothingToCashOut))
        );
        assert_eq!(round.state(), RoundState::Active);
        assert!(!round.can_cash_out());
    }

    #[test]
    fn cash_out_pays_current_reward() {
        let mut round = round(3, &[(0, 0)]);
        round.open_cell((2, 2)).unwrap();
        round.open_cell((2, 1)).unwrap();
        let expected = round.current_reward();

        let reward = round.cash_out().unwrap();

        assert_eq!(reward, expected);
        assert!(reward > 0.0);
        assert_eq!(round.state(), RoundState::CashedOut);
        assert_eq!(round.grid().opened_count(), 9);
        assert_eq!(round.opened_safe_count(), 2);
    }

    #[test]
    fn finished_round_rejects_moves() {
        let mut round = round(3, &[(0, 0)]);
        round.open_cell((0, 0)).unwrap();

        assert_eq!(
            round.open_cell((1, 1)),
            Err(GameError::NoOp(NoOpReason::NotActive))
        );
        assert_eq!(round.cash_out(), Err(GameError::NoOp(NoOpReason::NotActive)));
        assert_eq!(round.forfeit(), Err(GameError::NoOp(NoOpReason::NotActive)));
        assert_eq!(round.state(), RoundState::Lost);
    }

    #[test]
    fn out_of_bounds_open_is_rejected() {
        let mut round = round(3, &[(0, 0)]);
        assert_eq!(round.open_cell((3, 0)), Err(GameError::InvalidCoords));
        assert!(!GameError::InvalidCoords.is_no_op());
        assert_eq!(round.open_cell((0, 200)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn forfeit_ends_without_reward() {
        let mut round = round(3, &[(0, 0)]);
        round.open_cell((2, 2)).unwrap();

        round.forfeit().unwrap();

        assert_eq!(round.state(), RoundState::Lost);
        assert_eq!(round.reward(), None);
        assert_eq!(round.triggered_mine(), None);
    }

    #[test]
    fn with_grid_rejects_full_board() {
        let grid = Grid::from_mine_coords(1, &[(0, 0)]).unwrap();
        assert_eq!(
            Round::with_grid(1.0, "full", grid),
            Err(GameError::InvalidConfig(ConfigIssue::TooManyMines))
        );
    }
}
