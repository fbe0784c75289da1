//! Two-player grid battle game server.
//!
//! [`Engine`] owns the rules: seating players, validating fleets and
//! resolving shots. Games live in an injected [`GameStore`]. The
//! [`server`], [`skeleton`] and [`stub`] modules carry engine calls over a
//! [`transport::Transport`].

pub mod ai;
mod bitboard;
mod common;
pub mod config;
mod engine;
mod fleet;
mod game;
pub mod local;
mod logging;
mod player;
pub mod prelude;
pub mod protocol;
pub mod server;
mod ship;
pub mod skeleton;
mod store;
pub mod stub;
pub mod transport;

pub use ai::Gunner;
pub use bitboard::{BitBoard, BitBoardError};
pub use common::*;
pub use config::*;
pub use engine::{Engine, Joined};
pub use fleet::{composition_of, expected_composition, Fleet};
pub use game::*;
pub use logging::{init_logging, LOG_ENV};
pub use player::Player;
pub use server::Server;
pub use ship::{Orientation, Ship};
pub use skeleton::Skeleton;
pub use store::{lock_game, new_id, GameHandle, GameStore, ID_LEN};
pub use stub::Stub;
