use serde::Deserialize;

use crate::error::{GameError, GameResult};
use crate::types::Square;

pub const DEFAULT_WIDTH: u8 = 8;
pub const DEFAULT_HEIGHT: u8 = 5;
const MAX_SQUARES: usize = 64;
const MAX_FILES: u8 = 26;

/// Board dimensions requested by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Fixed board geometry. Squares are indexed `y * width + x` in a `u64` mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
}

impl Board {
    pub fn new(width: u8, height: u8) -> GameResult<Self> {
        let invalid = |reason| GameError::InvalidDimensions {
            width,
            height,
            reason,
        };

        if width == 0 || height == 0 {
            return Err(invalid("both sides must be positive"));
        }
        if width > MAX_FILES {
            return Err(invalid("at most 26 files are supported"));
        }
        if width as usize * height as usize > MAX_SQUARES {
            return Err(invalid("at most 64 squares are supported"));
        }
        if width == 1 && height == 1 {
            return Err(invalid("start square would be the terminal square"));
        }

        Ok(Self { width, height })
    }

    pub fn from_config(config: BoardConfig) -> GameResult<Self> {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Bottom-left square, `a1`.
    pub fn start(&self) -> Square {
        Square::new(0, self.height - 1)
    }

    /// Top-right square. Landing here wins.
    pub fn terminal(&self) -> Square {
        Square::new(self.width - 1, 0)
    }

    pub fn contains(&self, square: Square) -> bool {
        square.x < self.width && square.y < self.height
    }

    pub fn num_squares(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Squares reachable from `from` in one move: strictly rightward along the
    /// row, or strictly upward along the column.
    pub fn legal_moves_mask(&self, from: Square) -> u64 {
        if !self.contains(from) {
            return 0;
        }

        let mut legal = 0u64;
        for x in from.x + 1..self.width {
            legal |= self.bit(Square::new(x, from.y));
        }
        for y in 0..from.y {
            legal |= self.bit(Square::new(from.x, y));
        }
        legal
    }

    /// Legal destinations, rightward ones first, then upward ones nearest first.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        if !self.contains(from) {
            return Vec::new();
        }

        let rightward = (from.x + 1..self.width).map(|x| Square::new(x, from.y));
        let upward = (0..from.y).rev().map(|y| Square::new(from.x, y));
        rightward.chain(upward).collect()
    }

    pub fn bit(&self, square: Square) -> u64 {
        if self.contains(square) {
            1u64 << self.index(square)
        } else {
            0
        }
    }

    pub fn index(&self, square: Square) -> usize {
        square.y as usize * self.width as usize + square.x as usize
    }

    pub fn square_at(&self, index: usize) -> Square {
        let width = self.width as usize;
        Square::new((index % width) as u8, (index / width) as u8)
    }

    /// Expands a move mask into squares, lowest index first.
    pub fn mask_to_squares(&self, mask: u64) -> Vec<Square> {
        let mut bits = mask;
        let mut out = Vec::new();

        while bits != 0 {
            out.push(self.square_at(bits.trailing_zeros() as usize));
            bits &= bits - 1;
        }

        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
