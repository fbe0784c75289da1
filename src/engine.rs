//! Game engine: the four game operations over an injected store.

use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::common::{Coord, GameError};
use crate::config::EngineConfig;
use crate::game::{Game, GameInfo, GameStatus, ShotResponse};
use crate::store::{lock_game, new_id, GameStore};

/// Identifiers handed to a player when creating or joining a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joined {
    pub game_id: String,
    pub player_id: String,
}

/// Entry point for all game operations.
///
/// Every operation looks its game up in the store and then runs entirely
/// under that game's lock, so calls against one game are serialized.
pub struct Engine {
    store: Arc<GameStore>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(store: Arc<GameStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a game seated with one player.
    pub fn create_game(&self) -> Joined {
        let player_id = new_id(&mut rand::rng());
        let creator = player_id.clone();
        let game_id = self.store.create(move |id| Game::new(id, creator));
        info!("game {} created by player {}", game_id, player_id);
        Joined { game_id, player_id }
    }

    /// Seat a second player in an existing game.
    pub fn join_game(&self, game_id: &str) -> Result<Joined, GameError> {
        let handle = self.store.get(game_id)?;
        let mut game = lock_game(&handle)?;
        let mut rng = rand::rng();
        let player_id = loop {
            let candidate = new_id(&mut rng);
            if !game.has_player(&candidate) {
                break candidate;
            }
        };
        game.add_player(player_id.clone()).inspect_err(|e| {
            debug!("join to game {} rejected: {}", game_id, e);
        })?;
        game.touch();
        info!("player {} joined game {}", player_id, game_id);
        Ok(Joined {
            game_id: game_id.to_string(),
            player_id,
        })
    }

    /// Submit a player's fleet.
    pub fn set_ships(
        &self,
        game_id: &str,
        player_id: &str,
        ships: &[Vec<Coord>],
    ) -> Result<(), GameError> {
        let handle = self.store.get(game_id)?;
        let mut game = lock_game(&handle)?;
        let status = game
            .set_fleet(player_id, ships, &self.config)
            .inspect_err(|e| {
                debug!("fleet from {} in game {} rejected: {}", player_id, game_id, e);
            })?;
        game.touch();
        info!("player {} placed ships in game {}", player_id, game_id);
        if status == GameStatus::Started {
            info!("game {} started, {} to move", game_id, game.turn());
        }
        Ok(())
    }

    /// Fire a shot at (x, y). Bounds are checked before any lookup.
    pub fn shoot(
        &self,
        game_id: &str,
        player_id: &str,
        x: i32,
        y: i32,
    ) -> Result<ShotResponse, GameError> {
        let target = Coord::new(x, y);
        target.checked_cell()?;
        let handle = self.store.get(game_id)?;
        let mut game = lock_game(&handle)?;
        let response = game.shoot(player_id, target).inspect_err(|e| {
            debug!("shot {} by {} in game {} rejected: {}", target, player_id, game_id, e);
        })?;
        game.touch();
        match &response {
            ShotResponse::Shot(report) => {
                debug!(
                    "game {}: {} fired at {} -> {:?} (sunk: {})",
                    game_id, player_id, target, report.result, report.sunk
                );
                if let Some(winner) = &report.winner {
                    info!("game {} won by {}", game_id, winner);
                }
            }
            ShotResponse::GameOver { winner } => {
                debug!("game {}: shot after game over, winner {}", game_id, winner);
            }
        }
        Ok(response)
    }

    /// A participant's view of the game. Only seated players may ask.
    pub fn game_info(&self, game_id: &str, player_id: &str) -> Result<GameInfo, GameError> {
        let handle = self.store.get(game_id)?;
        let game = lock_game(&handle)?;
        game.info(player_id)
    }
}
