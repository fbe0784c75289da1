//! Ship representation and shape checks using our `BitBoard`.

use core::fmt;

use crate::common::{Coord, GameError};
use crate::config::{BB, BOARD_SIZE};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Cells advance along `y`.
    Horizontal,
    /// Cells advance along `x`.
    Vertical,
}

/// A ship: its cells in submission order plus an occupancy mask.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<Coord>,
    mask: BB,
}

impl Ship {
    /// Build a ship from explicit cells. Every cell must be on the board.
    pub fn new(cells: Vec<Coord>) -> Result<Self, GameError> {
        let mut mask = BB::new();
        for coord in &cells {
            let (r, c) = coord.checked_cell()?;
            mask.set(r, c)
                .map_err(|e| GameError::Internal(e.to_string()))?;
        }
        Ok(Ship { cells, mask })
    }

    /// Place a straight ship of `len` cells starting at `origin`.
    pub fn place(origin: Coord, len: usize, orientation: Orientation) -> Result<Self, GameError> {
        let cells = (0..len as i32)
            .map(|i| match orientation {
                Orientation::Horizontal => Coord::new(origin.x, origin.y + i),
                Orientation::Vertical => Coord::new(origin.x + i, origin.y),
            })
            .collect();
        Self::new(cells)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BB {
        self.mask
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// A ship is sunk once every cell is in `fired`.
    pub fn is_sunk_by(&self, fired: &BB) -> bool {
        self.mask.is_subset_of(fired)
    }

    /// On-board cells touching the ship (diagonals included), excluding
    /// the ship itself.
    pub fn halo(&self) -> BB {
        self.mask.halo()
    }

    /// `true` when the cells form one straight line with no gaps.
    pub fn is_straight(&self) -> bool {
        let Some(first) = self.cells.first() else {
            return false;
        };
        let mut along: Vec<i32> = if self.cells.iter().all(|c| c.x == first.x) {
            self.cells.iter().map(|c| c.y).collect()
        } else if self.cells.iter().all(|c| c.y == first.y) {
            self.cells.iter().map(|c| c.x).collect()
        } else {
            return false;
        };
        along.sort_unstable();
        along.windows(2).all(|w| w[1] == w[0] + 1)
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ship {{ len: {}, cells: [", self.len())?;
        for (i, c) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "] }}")
    }
}

/// Largest origin component that still keeps a ship of `len` on the board.
pub(crate) fn max_origin(len: usize) -> i32 {
    BOARD_SIZE as i32 - len as i32
}
