use std::io::Write;

use sapper_core::{
    CellCount, Coord2, GameError, NoOpReason, OpenOutcome, RoundState, Session, UserIdentity,
    verify_layout,
};
use sapper_protocol::{HostMessage, RoundReport};

use crate::command::{Command, HELP, LayoutClaim};
use crate::render;
use crate::settings::{Settings, clamp_mines, sanitize_stake};

/// Drives a [`Session`] from player commands and writes what the player sees.
pub struct Host {
    session: Session,
    settings: Settings,
    identity: UserIdentity,
}

impl Host {
    pub fn new(settings: Settings, identity: UserIdentity) -> Self {
        Self {
            session: Session::new(settings.balance),
            settings,
            identity,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
        self.execute_at(command, now_ms(), out)
    }

    /// Runs `command` as if the clock read `now_ms`.
    pub fn execute_at(
        &mut self,
        command: Command,
        now_ms: u64,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        log::trace!("Executing {:?}", command);
        match command {
            Command::New { mines, stake } => self.new_round(mines, stake, now_ms, out),
            Command::Open(coords) => self.open(coords, out),
            Command::CashOut => self.cash_out(out),
            Command::Board => self.show_board(out),
            Command::Report => self.report(now_ms, out),
            Command::Verify(None) => self.verify_round(out),
            Command::Verify(Some(claim)) => self.verify_claim(&claim, out),
            Command::Help => Ok(writeln!(out, "{HELP}")?),
            Command::Quit => Ok(()),
        }
    }

    fn new_round(
        &mut self,
        mines: Option<CellCount>,
        stake: Option<f64>,
        now_ms: u64,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        if let Some(mines) = mines {
            self.settings.mines = clamp_mines(mines, self.settings.grid_size);
        }
        if let Some(stake) = stake {
            self.settings.stake = sanitize_stake(stake);
        }

        let config = self.settings.round_config();
        if config.stake > self.session.balance() {
            writeln!(out, "Not enough balance for the stake.")?;
            return Ok(());
        }
        if self.session.state().is_active() {
            self.session.forfeit()?;
            writeln!(out, "Previous round abandoned.")?;
        }

        match self.session.start_round(config, &self.identity, now_ms) {
            Ok(start) => {
                writeln!(out, "Seed: {}", start.seed)?;
                writeln!(
                    out,
                    "Round started. Open cells and don't hit a bomb! Balance: {:.2}",
                    start.balance
                )?;
                self.show_board(out)
            }
            Err(GameError::InsufficientBalance) => {
                Ok(writeln!(out, "Not enough balance for the stake.")?)
            }
            Err(err) => Ok(writeln!(out, "{err}")?),
        }
    }

    fn open(&mut self, coords: Coord2, out: &mut impl Write) -> anyhow::Result<()> {
        let result = match self.session.open_cell(coords) {
            Ok(result) => result,
            Err(err) => return self.refuse(err, out),
        };

        match result.outcome {
            OpenOutcome::Continue => {}
            OpenOutcome::Lost => writeln!(out, "Bomb! Round lost.")?,
            OpenOutcome::Won => writeln!(
                out,
                "Victory! Winnings: +{:.2}",
                result.reward.unwrap_or_default()
            )?,
        }
        self.show_board(out)
    }

    fn cash_out(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        match self.session.cash_out() {
            Ok(reward) => {
                writeln!(out, "Cash-out: +{reward:.2}. Round finished.")?;
                self.show_board(out)
            }
            Err(err) => self.refuse(err, out),
        }
    }

    fn show_board(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(round) = self.session.round() else {
            writeln!(out, "No round yet, type `new` to start.")?;
            return Ok(());
        };
        write!(out, "{}", render::board(round))?;
        writeln!(out, "{}", render::status_line(round, self.session.balance()))?;
        Ok(())
    }

    fn report(&self, now_ms: u64, out: &mut impl Write) -> anyhow::Result<()> {
        let (seed, bombs, stake) = match self.session.round() {
            Some(round) => (
                round.seed().to_string(),
                round.config().mine_count,
                round.config().stake,
            ),
            None => (String::new(), self.settings.mines, self.settings.stake),
        };
        let message = HostMessage::from(RoundReport {
            seed,
            bombs,
            stake,
            opened_safe: self.session.opened_safe_count(),
            balance: self.session.balance(),
            time: now_ms,
        });
        writeln!(out, "{}", message.to_json()?)?;
        Ok(())
    }

    fn verify_round(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(round) = self.session.round().filter(|round| round.is_finished()) else {
            writeln!(out, "Finish the round before verifying its seed.")?;
            return Ok(());
        };
        let config = round.config();
        let shown = round.grid().mine_coords();
        if verify_layout(config.grid_size, config.mine_count, round.seed(), &shown)? {
            writeln!(out, "Seed {:?} reproduces this board.", round.seed())?;
        } else {
            log::warn!("Board does not match seed {:?}", round.seed());
            writeln!(out, "Board does NOT match seed {:?}!", round.seed())?;
        }
        Ok(())
    }

    fn verify_claim(&self, claim: &LayoutClaim, out: &mut impl Write) -> anyhow::Result<()> {
        let grid_size = self.settings.grid_size;
        match verify_layout(grid_size, claim.mine_count, &claim.seed, &claim.mines) {
            Ok(true) => writeln!(
                out,
                "Seed {:?} reproduces the published {grid_size}x{grid_size} board.",
                claim.seed
            )?,
            Ok(false) => {
                log::warn!("Published board does not match seed {:?}", claim.seed);
                writeln!(out, "Board does NOT match seed {:?}!", claim.seed)?;
            }
            Err(err) => writeln!(out, "Cannot rebuild that board: {err}")?,
        }
        Ok(())
    }

    fn refuse(&self, err: GameError, out: &mut impl Write) -> anyhow::Result<()> {
        if err.is_no_op() {
            log::debug!("Ignored move: {err}");
        } else {
            log::warn!("Rejected move: {err}");
        }
        let message = match err {
            GameError::NoOp(NoOpReason::NotActive) if self.session.state() == RoundState::Idle => {
                "No round yet, type `new` to start.".to_string()
            }
            GameError::NoOp(NoOpReason::NotActive) => {
                "Round is over, type `new` to play again.".to_string()
            }
            GameError::NoOp(NoOpReason::NothingToCashOut) => {
                "Open at least one safe cell before cashing out.".to_string()
            }
            GameError::InvalidCoords => "That cell is not on the board.".to_string(),
            other => other.to_string(),
        };
        writeln!(out, "{message}")?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
