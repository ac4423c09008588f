use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid round config: {0}")]
    InvalidConfig(ConfigIssue),
    #[error("Stake exceeds the available balance")]
    InsufficientBalance,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape must be a non-empty square")]
    InvalidBoardShape,
    #[error("Nothing to do: {0}")]
    NoOp(NoOpReason),
}

/// Why a [`RoundConfig`](crate::RoundConfig) was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("grid must have at least one cell")]
    EmptyGrid,
    #[error("at least one mine is required")]
    NoMines,
    #[error("mine count must leave at least one safe cell")]
    TooManyMines,
    #[error("stake must be a positive finite amount")]
    InvalidStake,
}

/// Actions that were refused because the round does not permit them right now.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    #[error("round is not active")]
    NotActive,
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("cell is already open")]
    AlreadyOpen,
    #[error("open at least one safe cell before cashing out")]
    NothingToCashOut,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfig(issue)
    }
}

impl From<NoOpReason> for GameError {
    fn from(reason: NoOpReason) -> Self {
        Self::NoOp(reason)
    }
}

impl GameError {
    pub const fn is_no_op(self) -> bool {
        matches!(self, Self::NoOp(_))
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
