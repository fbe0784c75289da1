//! Wire messages exchanged between clients and the server.

use serde::{Deserialize, Serialize};

use crate::common::{Coord, GameError};
use crate::engine::Joined;
use crate::game::{GameInfo, ShotResponse};

/// Current protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// A call into the game engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    CreateGame,
    JoinGame {
        game_id: String,
    },
    SetShips {
        game_id: String,
        player_id: String,
        ships: Vec<Vec<Coord>>,
    },
    Shoot {
        game_id: String,
        player_id: String,
        x: i32,
        y: i32,
    },
    GameInfo {
        game_id: String,
        player_id: String,
    },
}

/// Successful result of a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Joined(Joined),
    ShipsSet,
    Shot(ShotResponse),
    Info(GameInfo),
}

/// Framed messages carried by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Client greeting; the server echoes it back when versions match.
    Hello { version: u8 },
    /// Engine call tagged with a client-chosen sequence number.
    Call { seq: u64, request: Request },
    /// Answer to the `Call` with the same `seq`.
    Reply {
        seq: u64,
        reply: Result<Response, GameError>,
    },
    /// Sent by the server for a failed handshake, which also ends the
    /// session, or for an out-of-place message after it, which does not.
    Rejected { reason: String },
    /// Keep-alive, ignored by the server.
    Heartbeat,
}
