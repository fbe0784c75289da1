//! Message transports between a [`Stub`](crate::Stub) and a
//! [`Skeleton`](crate::Skeleton).

use crate::protocol::Message;

pub mod in_memory;
pub mod tcp;

/// The peer went away. Any other transport error means the stream is
/// broken or the peer misbehaved.
#[derive(Debug, thiserror::Error)]
pub enum Disconnected {
    #[error("Connection closed by peer")]
    PeerClosed,
    #[error("Connection reset by peer")]
    PeerReset,
    #[error("Channel closed")]
    ChannelClosed,
}

/// True when `err` reports an orderly or abrupt hang-up rather than bad data.
pub fn is_disconnect(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Disconnected>().is_some()
}

/// A bidirectional, ordered channel of protocol messages.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;

    /// Send `msg` and wait for the next non-heartbeat message.
    async fn exchange(&mut self, msg: Message) -> anyhow::Result<Message> {
        self.send(msg).await?;
        loop {
            match self.recv().await? {
                Message::Heartbeat => continue,
                other => return Ok(other),
            }
        }
    }
}
