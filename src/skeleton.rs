//! Server side of a connection: decodes calls and runs them on the engine.

use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, warn};

use crate::common::GameError;
use crate::engine::Engine;
use crate::protocol::{Message, Request, Response, PROTOCOL_VERSION};
use crate::transport::{is_disconnect, Transport};

pub struct Skeleton<T: Transport> {
    engine: Arc<Engine>,
    transport: T,
}

impl<T: Transport> Skeleton<T> {
    pub fn new(engine: Arc<Engine>, transport: T) -> Self {
        Self { engine, transport }
    }

    /// Serve one client until it disconnects.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport.send(Message::Hello { version }).await?;
            }
            Message::Hello { version } => {
                let reason = format!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION, version
                );
                warn!("rejecting client: {}", reason);
                self.transport
                    .send(Message::Rejected {
                        reason: reason.clone(),
                    })
                    .await?;
                return Err(anyhow!(reason));
            }
            other => {
                warn!("rejecting client: expected handshake, got {:?}", other);
                self.transport
                    .send(Message::Rejected {
                        reason: "Expected handshake".to_string(),
                    })
                    .await?;
                return Err(anyhow!("Expected handshake, got {:?}", other));
            }
        }

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) if is_disconnect(&e) => {
                    debug!("client disconnected");
                    return Ok(());
                }
                Err(e) => {
                    warn!("ending session on receive error: {}", e);
                    return Err(e);
                }
            };
            let reply = match msg {
                Message::Call { seq, request } => Message::Reply {
                    seq,
                    reply: dispatch(&self.engine, request),
                },
                Message::Heartbeat => continue,
                other => {
                    warn!("unexpected message from client: {:?}", other);
                    Message::Rejected {
                        reason: "Unexpected message".to_string(),
                    }
                }
            };
            self.transport.send(reply).await?;
        }
    }
}

/// Run a single request against the engine.
pub fn dispatch(engine: &Engine, request: Request) -> Result<Response, GameError> {
    match request {
        Request::CreateGame => Ok(Response::Joined(engine.create_game())),
        Request::JoinGame { game_id } => engine.join_game(&game_id).map(Response::Joined),
        Request::SetShips {
            game_id,
            player_id,
            ships,
        } => engine
            .set_ships(&game_id, &player_id, &ships)
            .map(|()| Response::ShipsSet),
        Request::Shoot {
            game_id,
            player_id,
            x,
            y,
        } => engine.shoot(&game_id, &player_id, x, y).map(Response::Shot),
        Request::GameInfo { game_id, player_id } => engine
            .game_info(&game_id, &player_id)
            .map(Response::Info),
    }
}
