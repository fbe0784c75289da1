//! In-memory game registry with one lock per game.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::common::GameError;
use crate::game::Game;

/// Length of generated game and player identifiers.
pub const ID_LEN: usize = 8;

/// Shared handle to a single game.
pub type GameHandle = Arc<Mutex<Game>>;

/// Random alphanumeric identifier.
pub fn new_id<R: Rng>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Lock a game for the duration of one operation.
pub fn lock_game(handle: &GameHandle) -> Result<MutexGuard<'_, Game>, GameError> {
    handle
        .lock()
        .map_err(|_| GameError::Internal("game state lock poisoned".to_string()))
}

/// Registry of all live games keyed by game id.
///
/// The map lock is only held to look up, insert or evict entries; game
/// operations run under the per-game mutex so independent games never wait
/// on each other. A poisoned map lock is recovered since every map update
/// is a single insert or remove.
#[derive(Default)]
pub struct GameStore {
    games: RwLock<HashMap<String, GameHandle>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a game built by `make` under a freshly generated unique id,
    /// returning that id.
    pub fn create<F>(&self, make: F) -> String
    where
        F: FnOnce(String) -> Game,
    {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        let mut rng = rand::rng();
        let id = loop {
            let candidate = new_id(&mut rng);
            if !games.contains_key(&candidate) {
                break candidate;
            }
        };
        games.insert(id.clone(), Arc::new(Mutex::new(make(id.clone()))));
        id
    }

    /// Look up a game by id.
    pub fn get(&self, id: &str) -> Result<GameHandle, GameError> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::NotFound(format!("game {}", id)))
    }

    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Remove games that have been idle for longer than `ttl`, plus any
    /// whose lock was poisoned. Returns the number removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        let before = games.len();
        games.retain(|id, handle| match handle.lock() {
            Ok(game) => game.idle_for(now) <= ttl,
            Err(_) => {
                warn!("evicting game {} with poisoned state", id);
                false
            }
        });
        let removed = before - games.len();
        if removed > 0 {
            info!("evicted {} idle games, {} remaining", removed, games.len());
        }
        removed
    }
}
