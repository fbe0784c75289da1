use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration, Instant};

use crate::protocol::Message;
use crate::transport::{Disconnected, Transport};

/// Default timeout for a single send or receive (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (1 MB). A full fleet submission is a few hundred bytes.
pub const MAX_MESSAGE_SIZE: u32 = 1_000_000;

/// Default idle timeout before the connection is considered dead (10 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Length-prefixed bincode frames over a TCP stream.
///
/// Each frame is a 4-byte big-endian length followed by the bincode body.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
    idle_timeout: Duration,
    last_activity: Instant,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, timeout_duration, MAX_MESSAGE_SIZE, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_config(
        stream: TcpStream,
        timeout_duration: Duration,
        max_message_size: u32,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size,
            idle_timeout,
            last_activity: Instant::now(),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Check if the connection has been idle for too long.
    pub fn is_idle_timeout(&self) -> bool {
        self.last_activity.elapsed() > self.idle_timeout
    }

    fn mark_activity(&mut self) {
        self.last_activity = Instant::now();
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => Disconnected::PeerClosed.into(),
        ErrorKind::ConnectionReset => Disconnected::PeerReset.into(),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        if self.is_idle_timeout() {
            return Err(anyhow::anyhow!("Connection idle timeout exceeded"));
        }

        let data = bincode::serialize(&msg)
            .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() > self.max_message_size as usize {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }

        let stream = &mut self.stream;
        let send_op = async move {
            stream
                .write_all(&(data.len() as u32).to_be_bytes())
                .await
                .map_err(io_error)?;
            stream.write_all(&data).await.map_err(io_error)?;
            stream.flush().await.map_err(io_error)
        };
        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))??;

        self.mark_activity();
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        if self.is_idle_timeout() {
            return Err(anyhow::anyhow!("Connection idle timeout exceeded"));
        }

        let max = self.max_message_size;
        let stream = &mut self.stream;
        let recv_op = async move {
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.map_err(io_error)?;
            let len = u32::from_be_bytes(len_buf);
            if len > max {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    max
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            stream.read_exact(&mut buf).await.map_err(io_error)?;
            bincode::deserialize::<Message>(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
        };
        let msg = timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))??;

        self.mark_activity();
        Ok(msg)
    }
}
