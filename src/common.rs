//! Common types for the game: coordinates, shot results and game errors.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;

/// A board coordinate as supplied by a client.
///
/// Components are signed so out-of-board input survives decoding and can be
/// rejected with [`GameError::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `true` when both components lie in `[0, BOARD_SIZE)`.
    pub fn is_on_board(&self) -> bool {
        let n = BOARD_SIZE as i32;
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// Bitboard cell `(row, col)` for this coordinate, or `None` when off board.
    pub fn cell(&self) -> Option<(usize, usize)> {
        self.is_on_board()
            .then_some((self.x as usize, self.y as usize))
    }

    pub fn from_cell((row, col): (usize, usize)) -> Self {
        Self::new(row as i32, col as i32)
    }

    /// Validates the coordinate and returns its cell, or `OutOfBounds`.
    pub fn checked_cell(&self) -> Result<(usize, usize), GameError> {
        self.cell().ok_or(GameError::OutOfBounds {
            x: self.x,
            y: self.y,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Outcome of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Hit,
    Miss,
}

impl ShotResult {
    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Hit)
    }
}

/// Ship-length histogram, as sorted `(length, count)` pairs.
pub type Composition = Vec<(usize, usize)>;

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GameError {
    /// Game, or player within the game, does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The game already has two players.
    #[error("game {0} is full")]
    GameFull(String),

    #[error("invalid fleet composition: expected {expected:?}, got {actual:?}")]
    InvalidFleetComposition {
        expected: Composition,
        actual: Composition,
    },

    #[error("invalid ship length {length}: must be between 1 and 4")]
    InvalidShipLength { length: usize },

    #[error("coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("ships overlap at ({x}, {y})")]
    OverlapError { x: i32, y: i32 },

    /// Ship cells do not form one straight contiguous line.
    #[error("ship {ship} is not a straight contiguous line")]
    InvalidShipShape { ship: usize },

    /// Fleets can no longer be changed once the game started.
    #[error("fleet is locked: game {0} has already started")]
    FleetLocked(String),

    #[error("not your turn, current turn: {current}")]
    NotYourTurn { current: String },

    #[error("waiting for second player")]
    WaitingForOpponent,

    #[error("already shot at ({x}, {y})")]
    AlreadyShot { x: i32, y: i32 },

    #[error("internal error: {0}")]
    Internal(String),
}
