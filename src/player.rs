//! Per-player state held by a game.

use crate::common::Coord;
use crate::config::BB;
use crate::fleet::Fleet;

/// One participant of a game.
#[derive(Debug, Clone)]
pub struct Player {
    id: String,
    fleet: Fleet,
    /// Every cell this player has fired at, auto-revealed misses included.
    fired: BB,
    ready: bool,
}

impl Player {
    pub fn new(id: String) -> Self {
        Self {
            id,
            fleet: Fleet::default(),
            fired: BB::new(),
            ready: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn fired(&self) -> BB {
        self.fired
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Cells fired at, as coordinates in row-major order.
    pub fn fired_coords(&self) -> Vec<Coord> {
        self.fired.iter_set_bits().map(Coord::from_cell).collect()
    }

    pub(crate) fn has_fired_at(&self, row: usize, col: usize) -> bool {
        self.fired.get(row, col).unwrap_or(false)
    }

    pub(crate) fn set_fleet(&mut self, fleet: Fleet) {
        self.fleet = fleet;
        self.ready = true;
    }

    pub(crate) fn set_fired(&mut self, fired: BB) {
        self.fired = fired;
    }
}
