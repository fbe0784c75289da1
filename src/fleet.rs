//! Fleet validation and random placement.

use std::collections::BTreeMap;

use log::debug;
use rand::Rng;

use crate::common::{Composition, Coord, GameError};
use crate::config::{EngineConfig, BB, FLEET, MAX_SHIP_LEN, MIN_SHIP_LEN};
use crate::ship::{max_origin, Orientation, Ship};

/// Attempts per ship before a random placement starts over.
const PLACEMENT_ATTEMPTS: usize = 100;
/// Whole-fleet restarts before random placement gives up.
const FLEET_ATTEMPTS: usize = 50;

/// A player's ships. Empty until a valid fleet is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
    ship_map: BB,
}

/// The required composition as sorted `(length, count)` pairs.
pub fn expected_composition() -> Composition {
    let mut expected = FLEET.to_vec();
    expected.sort_unstable();
    expected
}

/// Length histogram of a candidate fleet.
pub fn composition_of(candidate: &[Vec<Coord>]) -> Composition {
    let mut counts = BTreeMap::new();
    for ship in candidate {
        *counts.entry(ship.len()).or_insert(0usize) += 1;
    }
    counts.into_iter().collect()
}

impl Fleet {
    /// Validate a submitted fleet and build it.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// composition, then per ship its length followed by the bounds and
    /// overlap of each cell, then its shape.
    pub fn validate(candidate: &[Vec<Coord>], config: &EngineConfig) -> Result<Self, GameError> {
        let expected = expected_composition();
        let actual = composition_of(candidate);
        if actual != expected {
            return Err(GameError::InvalidFleetComposition { expected, actual });
        }

        let mut seen = BB::new();
        let mut ships = Vec::with_capacity(candidate.len());
        for (idx, cells) in candidate.iter().enumerate() {
            let length = cells.len();
            if !(MIN_SHIP_LEN..=MAX_SHIP_LEN).contains(&length) {
                return Err(GameError::InvalidShipLength { length });
            }
            for coord in cells {
                let (r, c) = coord.checked_cell()?;
                if seen.get(r, c).unwrap_or(false) {
                    return Err(GameError::OverlapError {
                        x: coord.x,
                        y: coord.y,
                    });
                }
                seen.set(r, c)
                    .map_err(|e| GameError::Internal(e.to_string()))?;
            }
            let ship = Ship::new(cells.clone())?;
            if !config.allow_bent_ships && !ship.is_straight() {
                return Err(GameError::InvalidShipShape { ship: idx });
            }
            ships.push(ship);
        }

        Ok(Fleet {
            ships,
            ship_map: seen,
        })
    }

    /// Random legal fleet in which no two ships touch, not even diagonally.
    pub fn random<R: Rng>(rng: &mut R) -> Result<Self, GameError> {
        for attempt in 0..FLEET_ATTEMPTS {
            if let Some(fleet) = Self::try_random(rng) {
                return Ok(fleet);
            }
            debug!("random fleet placement restarted (attempt {})", attempt + 1);
        }
        Err(GameError::Internal("unable to place fleet".to_string()))
    }

    fn try_random<R: Rng>(rng: &mut R) -> Option<Self> {
        let mut fleet = Fleet::default();
        // Largest ships first so the crowded end of the placement is the
        // single-cell ships.
        let mut lengths: Vec<usize> = FLEET
            .iter()
            .flat_map(|&(len, count)| std::iter::repeat(len).take(count))
            .collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));

        for len in lengths {
            let blocked = fleet.ship_map | fleet.ship_map.halo();
            let ship = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
                let orient = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let (max_x, max_y) = match orient {
                    Orientation::Vertical => (max_origin(len), max_origin(1)),
                    Orientation::Horizontal => (max_origin(1), max_origin(len)),
                };
                let origin = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
                let ship = Ship::place(origin, len, orient).ok()?;
                (ship.mask() & blocked).is_empty().then_some(ship)
            })?;
            fleet.ship_map |= ship.mask();
            fleet.ships.push(ship);
        }
        Some(fleet)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Occupancy mask of all ships.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// The ship occupying (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(row, col))
    }

    /// `true` once every ship cell is in `fired`.
    pub fn all_sunk_by(&self, fired: &BB) -> bool {
        self.ships.iter().all(|s| s.is_sunk_by(fired))
    }

    /// Ship cells as submitted, handy for resubmitting a generated fleet.
    pub fn to_cells(&self) -> Vec<Vec<Coord>> {
        self.ships.iter().map(|s| s.cells().to_vec()).collect()
    }
}
