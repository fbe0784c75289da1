//! TCP accept loop and idle-game sweeper.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::config::ServerConfig;
use crate::engine::Engine;
use crate::skeleton::Skeleton;
use crate::store::GameStore;
use crate::transport::tcp::{TcpTransport, DEFAULT_IDLE_TIMEOUT};

pub struct Server {
    listener: TcpListener,
    engine: Arc<Engine>,
    config: ServerConfig,
}

impl Server {
    /// Bind to `config.bind` with a fresh, empty game store.
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.bind).await?;
        let engine = Arc::new(Engine::new(Arc::new(GameStore::new()), config.engine));
        Ok(Self::with_listener(listener, engine, config))
    }

    pub fn with_listener(listener: TcpListener, engine: Arc<Engine>, config: ServerConfig) -> Self {
        Self {
            listener,
            engine,
            config,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn engine(&self) -> Arc<Engine> {
        self.engine.clone()
    }

    /// Accept clients forever, one task per connection.
    pub async fn run(self) -> anyhow::Result<()> {
        let sweeper = spawn_sweeper(
            self.engine.store().clone(),
            self.config.game_ttl,
            self.config.sweep_interval,
        );
        info!("listening on {}", self.listener.local_addr()?);

        let result = loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(e) => break Err(anyhow::anyhow!("accept failed: {}", e)),
            };
            info!("client connected from {}", addr);
            let engine = self.engine.clone();
            tokio::spawn(async move {
                let transport = TcpTransport::with_timeout(stream, DEFAULT_IDLE_TIMEOUT);
                let mut skeleton = Skeleton::new(engine, transport);
                if let Err(e) = skeleton.run().await {
                    debug!("connection {} ended with error: {}", addr, e);
                }
            });
        };
        sweeper.abort();
        result
    }
}

/// Periodically evict games idle for longer than `ttl`.
pub fn spawn_sweeper(store: Arc<GameStore>, ttl: Duration, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.evict_idle(ttl);
        }
    })
}
