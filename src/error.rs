use crate::types::Square;

/// Errors raised by the checked game operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid board dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u8,
        height: u8,
        reason: &'static str,
    },

    #[error("square {0} is outside the board")]
    OutOfBounds(Square),

    #[error("illegal move to {0}")]
    IllegalMove(Square),

    #[error("game is already over")]
    GameOver,

    #[error("move selector could not select a move")]
    NoMoveSelected,
}

pub type GameResult<T> = Result<T, GameError>;
