use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine count should be from 0 to 81")]
    InvalidMineCount,
    #[error("Row and column should be from 1 to 9")]
    OutOfRange,
    #[error("Round already ended, no further moves are accepted")]
    RoundOver,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a mark command was refused without touching the board.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("There is a number here!")]
    NumberHere,
}
