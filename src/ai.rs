//! Computer opponent: a hunt/target shooter.

use rand::Rng;

use crate::common::Coord;
use crate::config::{BB, BOARD_SIZE};
use crate::game::ShotReport;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Picks shots at random until it scores a hit, then works the orthogonal
/// neighbors of unsunk hits until the ship goes down.
#[derive(Debug, Clone, Default)]
pub struct Gunner {
    fired: BB,
    open_hits: BB,
}

impl Gunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells already fired at, as far as this gunner knows.
    pub fn fired(&self) -> BB {
        self.fired
    }

    /// Next cell to fire at, or `None` once the whole board is covered.
    pub fn select_target<R: Rng>(&self, rng: &mut R) -> Option<Coord> {
        let targets = self.target_cells();
        let pool: Vec<(usize, usize)> = if targets.is_empty() {
            (!self.fired).iter_set_bits().collect()
        } else {
            targets.iter_set_bits().collect()
        };
        if pool.is_empty() {
            return None;
        }
        Some(Coord::from_cell(pool[rng.random_range(0..pool.len())]))
    }

    /// Fold the server's verdict on `target` into what the gunner knows.
    pub fn record(&mut self, target: Coord, report: &ShotReport) {
        let Some((row, col)) = target.cell() else {
            return;
        };
        let _ = self.fired.set(row, col);
        for c in &report.adjacent {
            if let Some((r, c)) = c.cell() {
                let _ = self.fired.set(r, c);
            }
        }
        if report.sunk {
            let ring = BB::from_iter(report.adjacent.iter().filter_map(Coord::cell))
                .unwrap_or_default();
            // The sunk ship lies inside its revealed ring.
            self.open_hits = self.open_hits & !(ring | ring.halo());
        } else if report.result.is_hit() {
            let _ = self.open_hits.set(row, col);
        }
    }

    /// Unfired orthogonal neighbors of unsunk hits.
    fn target_cells(&self) -> BB {
        let mut out = BB::new();
        for (r, c) in self.open_hits.iter_set_bits() {
            let neighbors = [
                (r.wrapping_sub(1), c),
                (r + 1, c),
                (r, c.wrapping_sub(1)),
                (r, c + 1),
            ];
            for (nr, nc) in neighbors {
                if nr < GRID_SIZE && nc < GRID_SIZE {
                    let _ = out.set(nr, nc);
                }
            }
        }
        out & !self.fired
    }
}
