use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{Analysis, Square};

static DEFAULT_SOLUTION: Lazy<Solution> = Lazy::new(|| Solution::solve(&Board::default()));

/// Win/loss verdict of every square for the side to move, under perfect play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    board: Board,
    /// Bit set when the side to move from that square can force a win.
    winning: u64,
}

impl Solution {
    /// Retrograde pass over the board. Every move goes right or up, so scanning
    /// rows top-down and each row right-to-left visits successors first.
    pub fn solve(board: &Board) -> Self {
        let mut winning = 0u64;

        for y in 0..board.height() {
            for x in (0..board.width()).rev() {
                let from = Square::new(x, y);
                // Landing on the terminal square ended the game, so the side to
                // move there has lost.
                if from == board.terminal() {
                    continue;
                }

                let moves = board.legal_moves_mask(from);
                if moves & !winning != 0 {
                    winning |= board.bit(from);
                }
            }
        }

        Self {
            board: *board,
            winning,
        }
    }

    /// Shared solution of the 8x5 board, computed on first use.
    pub fn default_board() -> &'static Self {
        &DEFAULT_SOLUTION
    }

    /// Reuses the shared default solution when the board is 8x5.
    pub fn for_board(board: &Board) -> Self {
        if *board == Board::default() {
            Self::default_board().clone()
        } else {
            Self::solve(board)
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_winning(&self, from: Square) -> bool {
        self.winning & self.board.bit(from) != 0
    }

    /// Moves that leave the opponent in a lost square, in legal-move order.
    pub fn winning_moves(&self, from: Square) -> Vec<Square> {
        self.board
            .legal_moves(from)
            .into_iter()
            .filter(|to| !self.is_winning(*to))
            .collect()
    }

    /// Terminal square when reachable, else the first winning move, else the
    /// first legal move.
    pub fn best_move(&self, from: Square) -> Option<Square> {
        let terminal = self.board.terminal();
        if self.board.legal_moves_mask(from) & self.board.bit(terminal) != 0 {
            return Some(terminal);
        }

        self.winning_moves(from)
            .first()
            .copied()
            .or_else(|| self.board.legal_moves(from).first().copied())
    }

    pub fn analyze(&self, from: Square) -> Analysis {
        Analysis {
            is_winning: self.is_winning(from),
            winning_moves: self.winning_moves(from),
            best_move: self.best_move(from),
        }
    }
}
