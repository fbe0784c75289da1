//! Game state machine: joining, fleet submission and shot resolution.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::common::{Coord, GameError, ShotResult};
use crate::config::{EngineConfig, BB};
use crate::fleet::Fleet;
use crate::player::Player;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 2;

/// Lifecycle stage of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// One player, waiting for an opponent to join.
    Waiting,
    /// Both players joined, fleets not yet submitted by both.
    Ready,
    /// Both fleets submitted; shots are being exchanged.
    Started,
    /// A winner has been decided.
    Finished,
}

/// Outcome of a resolved shot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotReport {
    pub result: ShotResult,
    /// Player holding the turn after this shot.
    pub next_turn: String,
    pub winner: Option<String>,
    pub sunk: bool,
    /// Cells around a sunk ship, revealed as misses. Empty unless `sunk`.
    pub adjacent: Vec<Coord>,
}

/// Response to a shot request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResponse {
    Shot(ShotReport),
    /// The game was already decided; nothing was changed.
    GameOver { winner: String },
}

/// A player as seen from one participant of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    You,
    Opponent,
}

/// Public view of a player. Player ids are never exposed here since
/// holding one is what authorizes moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub seat: Seat,
    pub ready: bool,
}

/// A participant's view of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: String,
    pub status: GameStatus,
    pub players: Vec<PlayerInfo>,
    pub turn: Seat,
    pub winner: Option<Seat>,
}

/// Everything a shot will change, computed before anything is mutated.
struct ShotPlan {
    shooter: usize,
    opponent_id: String,
    result: ShotResult,
    sunk: bool,
    adjacent: BB,
    fired: BB,
    won: bool,
}

/// A single two-player game.
#[derive(Debug, Clone)]
pub struct Game {
    id: String,
    players: Vec<Player>,
    turn: String,
    winner: Option<String>,
    status: GameStatus,
    last_active: Instant,
}

impl Game {
    /// New game holding its creator, who also holds the first turn.
    pub fn new(id: String, first_player: String) -> Self {
        Self {
            id,
            turn: first_player.clone(),
            players: vec![Player::new(first_player)],
            winner: None,
            status: GameStatus::Waiting,
            last_active: Instant::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> GameStatus {
        if self.winner.is_some() {
            GameStatus::Finished
        } else {
            self.status
        }
    }

    pub fn turn(&self) -> &str {
        &self.turn
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn has_player(&self, id: &str) -> bool {
        self.player(id).is_some()
    }

    /// The other participant, if one has joined.
    pub fn opponent_of(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() != id)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Time since the last operation touched this game.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_active)
    }

    pub(crate) fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// Summary of the game as seen by `viewer`, who must be seated in it.
    pub fn info(&self, viewer: &str) -> Result<GameInfo, GameError> {
        self.player_index(viewer)?;
        let seat = |id: &str| if id == viewer { Seat::You } else { Seat::Opponent };
        Ok(GameInfo {
            game_id: self.id.clone(),
            status: self.status(),
            players: self
                .players
                .iter()
                .map(|p| PlayerInfo {
                    seat: seat(p.id()),
                    ready: p.is_ready(),
                })
                .collect(),
            turn: seat(&self.turn),
            winner: self.winner.as_deref().map(seat),
        })
    }

    /// Seat a second player.
    pub fn add_player(&mut self, id: String) -> Result<(), GameError> {
        if self.is_full() {
            return Err(GameError::GameFull(self.id.clone()));
        }
        self.players.push(Player::new(id));
        if self.is_full() {
            self.status = GameStatus::Ready;
        }
        Ok(())
    }

    /// Validate and store a player's fleet. Returns the resulting status.
    pub fn set_fleet(
        &mut self,
        player_id: &str,
        candidate: &[Vec<Coord>],
        config: &EngineConfig,
    ) -> Result<GameStatus, GameError> {
        let idx = self.player_index(player_id)?;
        if matches!(self.status(), GameStatus::Started | GameStatus::Finished) {
            return Err(GameError::FleetLocked(self.id.clone()));
        }
        let fleet = Fleet::validate(candidate, config)?;
        self.players[idx].set_fleet(fleet);
        if self.is_full() && self.players.iter().all(Player::is_ready) {
            self.status = GameStatus::Started;
        }
        Ok(self.status())
    }

    /// Fire at `target` on behalf of `player_id`.
    ///
    /// All preconditions are checked and the full outcome computed before
    /// the game is modified, so a rejected shot leaves no trace.
    pub fn shoot(&mut self, player_id: &str, target: Coord) -> Result<ShotResponse, GameError> {
        let cell = target.checked_cell()?;
        let shooter = self.player_index(player_id)?;
        if let Some(winner) = &self.winner {
            return Ok(ShotResponse::GameOver {
                winner: winner.clone(),
            });
        }
        let plan = self.plan_shot(shooter, cell, target)?;
        Ok(ShotResponse::Shot(self.apply_shot(plan)))
    }

    fn plan_shot(
        &self,
        shooter: usize,
        (row, col): (usize, usize),
        target: Coord,
    ) -> Result<ShotPlan, GameError> {
        let player = &self.players[shooter];
        if player.id() != self.turn {
            return Err(GameError::NotYourTurn {
                current: self.turn.clone(),
            });
        }
        // Shots only resolve once both fleets are in and locked.
        if self.status() != GameStatus::Started {
            return Err(GameError::WaitingForOpponent);
        }
        let opponent = self
            .opponent_of(player.id())
            .ok_or(GameError::WaitingForOpponent)?;
        if player.has_fired_at(row, col) {
            return Err(GameError::AlreadyShot {
                x: target.x,
                y: target.y,
            });
        }

        let mut shot = BB::new();
        shot.set(row, col)
            .map_err(|e| GameError::Internal(e.to_string()))?;
        let mut fired = player.fired() | shot;

        let hit_ship = opponent.fleet().ship_at(row, col);
        let sunk = hit_ship.is_some_and(|ship| ship.is_sunk_by(&fired));
        let adjacent = match hit_ship {
            Some(ship) if sunk => ship.halo(),
            _ => BB::new(),
        };
        fired |= adjacent;

        Ok(ShotPlan {
            shooter,
            opponent_id: opponent.id().to_string(),
            result: if hit_ship.is_some() {
                ShotResult::Hit
            } else {
                ShotResult::Miss
            },
            sunk,
            adjacent,
            won: opponent.fleet().all_sunk_by(&fired),
            fired,
        })
    }

    fn apply_shot(&mut self, plan: ShotPlan) -> ShotReport {
        let shooter = &mut self.players[plan.shooter];
        shooter.set_fired(plan.fired);
        if plan.won {
            self.winner = Some(shooter.id().to_string());
            self.status = GameStatus::Finished;
        } else if !plan.result.is_hit() {
            self.turn = plan.opponent_id;
        }
        ShotReport {
            result: plan.result,
            next_turn: self.turn.clone(),
            winner: self.winner.clone(),
            sunk: plan.sunk,
            adjacent: plan.adjacent.iter_set_bits().map(Coord::from_cell).collect(),
        }
    }

    fn player_index(&self, id: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| GameError::NotFound(format!("player {} in game {}", id, self.id)))
    }
}
