use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundStart {
    pub seed: String,
    /// Balance after the stake was deducted
    pub balance: f64,
}

/// One player's balance and current round.
///
/// Sessions share nothing, so a host serving several players keeps one each.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    balance: f64,
    round: Option<Round>,
}

impl Session {
    pub const DEFAULT_BALANCE: f64 = 100.0;

    pub fn new(balance: f64) -> Self {
        Self {
            balance,
            round: None,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// The current round, or the last finished one until a new round starts.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn state(&self) -> RoundState {
        self.round.as_ref().map_or(RoundState::Idle, Round::state)
    }

    pub fn opened_safe_count(&self) -> CellCount {
        self.round.as_ref().map_or(0, Round::opened_safe_count)
    }

    /// Derives a fresh seed and starts a round with it.
    pub fn start_round(
        &mut self,
        config: RoundConfig,
        identity: &UserIdentity,
        timestamp_ms: u64,
    ) -> Result<RoundStart> {
        let seed = derive_seed(identity, timestamp_ms, config.mine_count, config.stake);
        self.start_round_with_seed(config, seed)
    }

    /// Starts a round from a known seed, e.g. to replay a published one.
    ///
    /// Nothing changes unless the round actually starts.
    pub fn start_round_with_seed(
        &mut self,
        config: RoundConfig,
        seed: impl Into<String>,
    ) -> Result<RoundStart> {
        config.validate()?;
        if self.state().is_active() {
            return Err(NoOpReason::RoundInProgress.into());
        }
        if config.stake > self.balance {
            log::debug!(
                "Stake {} exceeds balance {}, round not started",
                config.stake,
                self.balance
            );
            return Err(GameError::InsufficientBalance);
        }

        let round = Round::new(config, seed)?;
        let seed = String::from(round.seed());
        self.balance -= config.stake;
        self.round = Some(round);

        Ok(RoundStart {
            seed,
            balance: self.balance,
        })
    }

    /// Opens a cell in the active round, crediting the reward on a full clear.
    pub fn open_cell(&mut self, coords: Coord2) -> Result<OpenResult> {
        let round = self.active_round()?;
        let result = round.open_cell(coords)?;
        if let Some(reward) = result.reward {
            self.credit(reward);
        }
        Ok(result)
    }

    /// Ends the active round early, crediting the reward earned so far.
    pub fn cash_out(&mut self) -> Result<f64> {
        let reward = self.active_round()?.cash_out()?;
        self.credit(reward);
        Ok(reward)
    }

    /// Abandons the active round; its stake is not returned.
    pub fn forfeit(&mut self) -> Result<()> {
        self.active_round()?.forfeit()
    }

    fn active_round(&mut self) -> Result<&mut Round> {
        self.round
            .as_mut()
            .ok_or(GameError::NoOp(NoOpReason::NotActive))
    }

    fn credit(&mut self, reward: f64) {
        self.balance += reward;
        log::debug!("Credited {}, balance now {}", reward, self.balance);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BALANCE)
    }
}
