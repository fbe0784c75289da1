//! Client proxy exposing the engine operations over a transport.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use anyhow::anyhow;
use tokio::sync::Mutex;

use crate::common::Coord;
use crate::engine::Joined;
use crate::game::{GameInfo, ShotResponse};
use crate::protocol::{Message, Request, Response, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Remote handle to a game server.
///
/// Engine failures come back as `anyhow::Error` wrapping a
/// [`GameError`](crate::GameError); use `downcast_ref` to inspect them.
pub struct Stub<T: Transport> {
    transport: Mutex<T>,
    next_seq: AtomicU64,
    handshaken: AtomicBool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            next_seq: AtomicU64::new(0),
            handshaken: AtomicBool::new(false),
        }
    }

    async fn ensure_handshake(&self, transport: &mut T) -> anyhow::Result<()> {
        if self.handshaken.load(Ordering::SeqCst) {
            return Ok(());
        }
        let reply = transport
            .exchange(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match reply {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.handshaken.store(true, Ordering::SeqCst);
                Ok(())
            }
            Message::Rejected { reason } => Err(anyhow!("Handshake rejected: {}", reason)),
            other => Err(anyhow!("Unexpected handshake reply: {:?}", other)),
        }
    }

    async fn call(&self, request: Request) -> anyhow::Result<Response> {
        let mut transport = self.transport.lock().await;
        self.ensure_handshake(&mut *transport).await?;

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        match transport.exchange(Message::Call { seq, request }).await? {
            Message::Reply { seq: resp_seq, reply } if resp_seq == seq => {
                reply.map_err(anyhow::Error::from)
            }
            Message::Reply { seq: resp_seq, .. } => Err(anyhow!(
                "Sequence mismatch: expected {}, got {}",
                seq,
                resp_seq
            )),
            Message::Rejected { reason } => Err(anyhow!("Rejected by server: {}", reason)),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }

    pub async fn create_game(&self) -> anyhow::Result<Joined> {
        match self.call(Request::CreateGame).await? {
            Response::Joined(joined) => Ok(joined),
            other => Err(unexpected(other)),
        }
    }

    pub async fn join_game(&self, game_id: &str) -> anyhow::Result<Joined> {
        let request = Request::JoinGame {
            game_id: game_id.to_string(),
        };
        match self.call(request).await? {
            Response::Joined(joined) => Ok(joined),
            other => Err(unexpected(other)),
        }
    }

    pub async fn set_ships(
        &self,
        game_id: &str,
        player_id: &str,
        ships: Vec<Vec<Coord>>,
    ) -> anyhow::Result<()> {
        let request = Request::SetShips {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            ships,
        };
        match self.call(request).await? {
            Response::ShipsSet => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn shoot(
        &self,
        game_id: &str,
        player_id: &str,
        x: i32,
        y: i32,
    ) -> anyhow::Result<ShotResponse> {
        let request = Request::Shoot {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            x,
            y,
        };
        match self.call(request).await? {
            Response::Shot(shot) => Ok(shot),
            other => Err(unexpected(other)),
        }
    }

    pub async fn game_info(&self, game_id: &str, player_id: &str) -> anyhow::Result<GameInfo> {
        let request = Request::GameInfo {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
        };
        match self.call(request).await? {
            Response::Info(info) => Ok(info),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: Response) -> anyhow::Error {
    anyhow!("Unexpected response: {:?}", response)
}
