#![allow(dead_code)]

use std::sync::Arc;

use seabattle::{Coord, Engine, EngineConfig, GameStore, Joined};

pub fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

pub fn ship(cells: &[(i32, i32)]) -> Vec<Coord> {
    cells.iter().map(|&(x, y)| c(x, y)).collect()
}

/// A legal fleet with a single-cell ship in the (0, 0) corner.
pub fn standard_fleet() -> Vec<Vec<Coord>> {
    vec![
        ship(&[(2, 0), (2, 1), (2, 2), (2, 3)]),
        ship(&[(4, 0), (4, 1), (4, 2)]),
        ship(&[(6, 0), (6, 1), (6, 2)]),
        ship(&[(8, 0), (8, 1)]),
        ship(&[(2, 5), (2, 6)]),
        ship(&[(4, 5), (4, 6)]),
        ship(&[(0, 0)]),
        ship(&[(9, 9)]),
        ship(&[(7, 9)]),
        ship(&[(5, 9)]),
    ]
}

/// A cell that `standard_fleet` leaves empty.
pub const EMPTY_CELL: (i32, i32) = (9, 0);

pub fn engine() -> Engine {
    Engine::new(Arc::new(GameStore::new()), EngineConfig::default())
}

/// Create, join and place `standard_fleet` for both players.
pub fn started_game(engine: &Engine) -> (Joined, Joined) {
    let host = engine.create_game();
    let guest = engine.join_game(&host.game_id).unwrap();
    engine
        .set_ships(&host.game_id, &host.player_id, &standard_fleet())
        .unwrap();
    engine
        .set_ships(&guest.game_id, &guest.player_id, &standard_fleet())
        .unwrap();
    (host, guest)
}
