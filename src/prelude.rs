//! Commonly used types for ease of import.

pub use crate::{
    Coord, Engine, EngineConfig, Fleet, GameError, GameStatus, GameStore, Joined, ShotReport,
    ShotResponse, ShotResult,
};

pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
pub use crate::{Server, Skeleton, Stub};
