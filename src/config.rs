//! Board and fleet constants plus runtime configuration.

use std::time::Duration;

use crate::bitboard::BitBoard;

pub const BOARD_SIZE: u8 = 10;

/// Bitboard type covering the whole game board.
pub type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Required fleet as `(ship length, number of ships)` pairs.
pub const FLEET: [(usize, usize); 4] = [(4, 1), (3, 2), (2, 3), (1, 4)];

/// Total number of ships in a fleet.
pub const NUM_SHIPS: usize = 1 + 2 + 3 + 4;

pub const MIN_SHIP_LEN: usize = 1;
pub const MAX_SHIP_LEN: usize = 4;

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 * 2 + 2 * 3 + 4;

/// Rules applied by the engine when validating fleets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Accept ships whose cells are not a single straight contiguous line.
    pub allow_bent_ships: bool,
}

/// Default address the server binds to.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Games untouched for this long are evicted by the sweeper.
pub const DEFAULT_GAME_TTL: Duration = Duration::from_secs(60 * 60);

/// How often the sweeper scans the store for idle games.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runtime settings for the TCP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub game_ttl: Duration,
    pub sweep_interval: Duration,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            game_ttl: DEFAULT_GAME_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            engine: EngineConfig::default(),
        }
    }
}
