use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate. Row 0 is the top rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Algebraic name such as `a1`, given the board height.
    pub fn name(self, height: u8) -> String {
        let file = (b'a' + self.x) as char;
        format!("{file}{}", height.saturating_sub(self.y))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Player number used on the JS side.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(Player),
}

impl Status {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won(_))
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Self::InProgress => None,
            Self::Won(player) => Some(player),
        }
    }
}

/// Result of [`crate::game::GameInstance::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected,
    Accepted(Status),
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// One accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: u8,
    pub from: Square,
    pub to: Square,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub width: u8,
    pub height: u8,
    pub rook: Square,
    pub current_player: u8,
    pub is_game_over: bool,
    /// 0 while the game is in progress.
    pub winner: u8,
    pub legal_moves: Vec<Square>,
    pub history: Vec<MoveRecord>,
}

/// Answer to a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub accepted: bool,
    pub is_game_over: bool,
    pub winner: u8,
}

impl From<MoveOutcome> for MoveResult {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Rejected => Self {
                accepted: false,
                is_game_over: false,
                winner: 0,
            },
            MoveOutcome::Accepted(status) => Self {
                accepted: true,
                is_game_over: status.is_over(),
                winner: status.winner().map_or(0, Player::number),
            },
        }
    }
}

/// Perfect-play verdict for the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub is_winning: bool,
    pub winning_moves: Vec<Square>,
    pub best_move: Option<Square>,
}
