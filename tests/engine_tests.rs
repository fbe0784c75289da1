mod common;

use common::{c, engine, standard_fleet, started_game, EMPTY_CELL};
use seabattle::{
    lock_game, GameError, GameStatus, PlayerInfo, Seat, ShotReport, ShotResponse, ShotResult,
};

fn shot(response: ShotResponse) -> ShotReport {
    match response {
        ShotResponse::Shot(report) => report,
        other => panic!("expected a resolved shot, got {other:?}"),
    }
}

#[test]
fn test_create_game() {
    let engine = engine();
    let joined = engine.create_game();
    assert_eq!(joined.game_id.len(), 8);
    assert_eq!(joined.player_id.len(), 8);

    let info = engine
        .game_info(&joined.game_id, &joined.player_id)
        .unwrap();
    assert_eq!(info.status, GameStatus::Waiting);
    assert_eq!(info.turn, Seat::You);
    assert_eq!(
        info.players,
        vec![PlayerInfo {
            seat: Seat::You,
            ready: false
        }]
    );
    assert_eq!(info.winner, None);
}

#[test]
fn test_games_get_distinct_ids() {
    let engine = engine();
    let a = engine.create_game();
    let b = engine.create_game();
    assert_ne!(a.game_id, b.game_id);
    assert_eq!(engine.store().len(), 2);
}

#[test]
fn test_join_game() {
    let engine = engine();
    let host = engine.create_game();
    let guest = engine.join_game(&host.game_id).unwrap();
    assert_eq!(guest.game_id, host.game_id);
    assert_ne!(guest.player_id, host.player_id);
    let info = engine.game_info(&host.game_id, &guest.player_id).unwrap();
    assert_eq!(info.status, GameStatus::Ready);
    assert_eq!(info.players.len(), 2);
    assert_eq!(info.players[1].seat, Seat::You);
    assert_eq!(info.turn, Seat::Opponent);
}

#[test]
fn test_join_unknown_game() {
    let engine = engine();
    assert!(matches!(
        engine.join_game("nope"),
        Err(GameError::NotFound(_))
    ));
}

#[test]
fn test_third_join_is_game_full() {
    let engine = engine();
    let host = engine.create_game();
    engine.join_game(&host.game_id).unwrap();
    assert_eq!(
        engine.join_game(&host.game_id).unwrap_err(),
        GameError::GameFull(host.game_id.clone())
    );
}

#[test]
fn test_both_fleets_start_the_game() {
    let engine = engine();
    let host = engine.create_game();
    let guest = engine.join_game(&host.game_id).unwrap();

    engine
        .set_ships(&host.game_id, &host.player_id, &standard_fleet())
        .unwrap();
    let info = engine.game_info(&host.game_id, &host.player_id).unwrap();
    assert_eq!(info.status, GameStatus::Ready);

    engine
        .set_ships(&host.game_id, &guest.player_id, &standard_fleet())
        .unwrap();
    let info = engine.game_info(&host.game_id, &host.player_id).unwrap();
    assert_eq!(info.status, GameStatus::Started);
    assert!(info.players.iter().all(|p| p.ready));
}

#[test]
fn test_lone_player_fleet_does_not_start() {
    let engine = engine();
    let host = engine.create_game();
    engine
        .set_ships(&host.game_id, &host.player_id, &standard_fleet())
        .unwrap();
    let info = engine.game_info(&host.game_id, &host.player_id).unwrap();
    assert_eq!(info.status, GameStatus::Waiting);
}

#[test]
fn test_set_ships_unknown_ids() {
    let engine = engine();
    let host = engine.create_game();
    assert!(matches!(
        engine.set_ships("nope", &host.player_id, &standard_fleet()),
        Err(GameError::NotFound(_))
    ));
    assert!(matches!(
        engine.set_ships(&host.game_id, "nobody", &standard_fleet()),
        Err(GameError::NotFound(_))
    ));
}

#[test]
fn test_fleet_resubmission_before_start() {
    let engine = engine();
    let host = engine.create_game();
    engine.join_game(&host.game_id).unwrap();
    engine
        .set_ships(&host.game_id, &host.player_id, &standard_fleet())
        .unwrap();
    engine
        .set_ships(&host.game_id, &host.player_id, &standard_fleet())
        .unwrap();
}

#[test]
fn test_fleet_locked_after_start() {
    let engine = engine();
    let (host, _) = started_game(&engine);
    assert_eq!(
        engine
            .set_ships(&host.game_id, &host.player_id, &standard_fleet())
            .unwrap_err(),
        GameError::FleetLocked(host.game_id.clone())
    );
}

#[test]
fn test_rejected_fleet_leaves_player_unready() {
    let engine = engine();
    let host = engine.create_game();
    let mut ships = standard_fleet();
    ships.pop();
    assert!(engine
        .set_ships(&host.game_id, &host.player_id, &ships)
        .is_err());
    let info = engine.game_info(&host.game_id, &host.player_id).unwrap();
    assert!(!info.players[0].ready);
}

#[test]
fn test_out_of_board_shot_wins_over_missing_game() {
    let engine = engine();
    assert_eq!(
        engine.shoot("nope", "nobody", 10, 3).unwrap_err(),
        GameError::OutOfBounds { x: 10, y: 3 }
    );
    assert_eq!(
        engine.shoot("nope", "nobody", 0, -1).unwrap_err(),
        GameError::OutOfBounds { x: 0, y: -1 }
    );
}

#[test]
fn test_shoot_unknown_game_and_player() {
    let engine = engine();
    let (host, _) = started_game(&engine);
    assert!(matches!(
        engine.shoot("nope", &host.player_id, 1, 1),
        Err(GameError::NotFound(_))
    ));
    assert!(matches!(
        engine.shoot(&host.game_id, "nobody", 1, 1),
        Err(GameError::NotFound(_))
    ));
}

#[test]
fn test_shot_without_opponent() {
    let engine = engine();
    let host = engine.create_game();
    assert_eq!(
        engine.shoot(&host.game_id, &host.player_id, 1, 1).unwrap_err(),
        GameError::WaitingForOpponent
    );
}

#[test]
fn test_shot_before_opponent_fleet() {
    let engine = engine();
    let host = engine.create_game();
    engine.join_game(&host.game_id).unwrap();
    assert_eq!(
        engine.shoot(&host.game_id, &host.player_id, 1, 1).unwrap_err(),
        GameError::WaitingForOpponent
    );
}

#[test]
fn test_no_shots_until_both_fleets_are_placed() {
    let engine = engine();
    let host = engine.create_game();
    let guest = engine.join_game(&host.game_id).unwrap();
    engine
        .set_ships(&guest.game_id, &guest.player_id, &standard_fleet())
        .unwrap();

    // The host holds the turn and the guest's fleet is in, but the host
    // has not placed ships yet.
    assert_eq!(
        engine.shoot(&host.game_id, &host.player_id, 2, 0).unwrap_err(),
        GameError::WaitingForOpponent
    );
    let info = engine.game_info(&host.game_id, &host.player_id).unwrap();
    assert_eq!(info.status, GameStatus::Ready);

    // Nothing was recorded, so the guest may still rearrange.
    engine
        .set_ships(&guest.game_id, &guest.player_id, &standard_fleet())
        .unwrap();
    let handle = engine.store().get(&host.game_id).unwrap();
    assert!(lock_game(&handle)
        .unwrap()
        .players()
        .iter()
        .all(|p| p.fired().is_empty()));

    engine
        .set_ships(&host.game_id, &host.player_id, &standard_fleet())
        .unwrap();
    let report = shot(engine.shoot(&host.game_id, &host.player_id, 2, 0).unwrap());
    assert_eq!(report.result, ShotResult::Hit);
    assert_eq!(
        engine
            .set_ships(&guest.game_id, &guest.player_id, &standard_fleet())
            .unwrap_err(),
        GameError::FleetLocked(guest.game_id.clone())
    );
}

#[test]
fn test_game_info_hides_player_ids() {
    let engine = engine();
    let (host, guest) = started_game(&engine);

    for viewer in [&host.player_id, &guest.player_id] {
        let info = engine.game_info(&host.game_id, viewer).unwrap();
        let rendered = format!("{info:?}");
        assert!(!rendered.contains(host.player_id.as_str()));
        assert!(!rendered.contains(guest.player_id.as_str()));
    }

    let info = engine.game_info(&host.game_id, &guest.player_id).unwrap();
    assert_eq!(info.turn, Seat::Opponent);
    assert_eq!(
        info.players.iter().map(|p| p.seat).collect::<Vec<_>>(),
        vec![Seat::Opponent, Seat::You]
    );
}

#[test]
fn test_game_info_requires_a_seat() {
    let engine = engine();
    let (host, _) = started_game(&engine);
    assert!(matches!(
        engine.game_info(&host.game_id, "outsider"),
        Err(GameError::NotFound(_))
    ));
    assert!(matches!(
        engine.game_info("nope", &host.player_id),
        Err(GameError::NotFound(_))
    ));
}

#[test]
fn test_not_your_turn_names_turn_holder() {
    let engine = engine();
    let (host, guest) = started_game(&engine);
    assert_eq!(
        engine.shoot(&host.game_id, &guest.player_id, 1, 1).unwrap_err(),
        GameError::NotYourTurn {
            current: host.player_id.clone()
        }
    );
}

#[test]
fn test_miss_passes_turn() {
    let engine = engine();
    let (host, guest) = started_game(&engine);
    let (x, y) = EMPTY_CELL;
    let report = shot(engine.shoot(&host.game_id, &host.player_id, x, y).unwrap());
    assert_eq!(report.result, ShotResult::Miss);
    assert_eq!(report.next_turn, guest.player_id);
    assert!(!report.sunk);
    assert!(report.adjacent.is_empty());
    assert_eq!(report.winner, None);
}

#[test]
fn test_hit_keeps_turn() {
    let engine = engine();
    let (host, _) = started_game(&engine);
    let report = shot(engine.shoot(&host.game_id, &host.player_id, 2, 0).unwrap());
    assert_eq!(report.result, ShotResult::Hit);
    assert!(!report.sunk);
    assert!(report.adjacent.is_empty());
    assert_eq!(report.next_turn, host.player_id);
}

#[test]
fn test_repeat_shot_is_already_shot() {
    let engine = engine();
    let (host, _) = started_game(&engine);
    engine.shoot(&host.game_id, &host.player_id, 2, 0).unwrap();
    assert_eq!(
        engine.shoot(&host.game_id, &host.player_id, 2, 0).unwrap_err(),
        GameError::AlreadyShot { x: 2, y: 0 }
    );
}

#[test]
fn test_sinking_corner_ship_reveals_neighbors() {
    let engine = engine();
    let (host, guest) = started_game(&engine);
    let (x, y) = EMPTY_CELL;
    engine.shoot(&host.game_id, &host.player_id, x, y).unwrap();

    let report = shot(engine.shoot(&host.game_id, &guest.player_id, 0, 0).unwrap());
    assert_eq!(report.result, ShotResult::Hit);
    assert!(report.sunk);
    assert_eq!(report.adjacent, vec![c(0, 1), c(1, 0), c(1, 1)]);
    assert_eq!(report.next_turn, guest.player_id);

    // Revealed cells count as fired.
    assert_eq!(
        engine.shoot(&host.game_id, &guest.player_id, 1, 1).unwrap_err(),
        GameError::AlreadyShot { x: 1, y: 1 }
    );
}

#[test]
fn test_sinking_longer_ship() {
    let engine = engine();
    let (host, _) = started_game(&engine);
    for y in 0..2 {
        let report = shot(engine.shoot(&host.game_id, &host.player_id, 4, y).unwrap());
        assert!(!report.sunk);
    }
    let report = shot(engine.shoot(&host.game_id, &host.player_id, 4, 2).unwrap());
    assert!(report.sunk);
    // Rows 3 and 5 over columns 0..=3, plus (4, 3).
    assert_eq!(report.adjacent.len(), 9);
    assert!(report.adjacent.contains(&c(4, 3)));
    assert!(!report.adjacent.contains(&c(4, 1)));
}

#[test]
fn test_full_game_to_victory() {
    let engine = engine();
    let (host, guest) = started_game(&engine);

    let targets: Vec<_> = standard_fleet().into_iter().flatten().collect();
    let mut last = None;
    for target in &targets {
        let report = shot(
            engine
                .shoot(&host.game_id, &host.player_id, target.x, target.y)
                .unwrap(),
        );
        assert_eq!(report.result, ShotResult::Hit);
        last = Some(report);
    }
    let last = last.unwrap();
    assert_eq!(last.winner.as_deref(), Some(host.player_id.as_str()));
    assert!(last.sunk);

    let info = engine.game_info(&host.game_id, &guest.player_id).unwrap();
    assert_eq!(info.status, GameStatus::Finished);
    assert_eq!(info.winner, Some(Seat::Opponent));

    let handle = engine.store().get(&host.game_id).unwrap();
    let fired_before: Vec<_> = {
        let game = lock_game(&handle).unwrap();
        game.players().iter().map(|p| p.fired()).collect()
    };

    // Both players now get the game-over reply, on used and fresh cells alike.
    for (player, (x, y)) in [
        (&host.player_id, (0, 0)),
        (&host.player_id, EMPTY_CELL),
        (&guest.player_id, (5, 5)),
    ] {
        assert_eq!(
            engine.shoot(&host.game_id, player, x, y).unwrap(),
            ShotResponse::GameOver {
                winner: host.player_id.clone()
            }
        );
    }

    assert_eq!(
        engine.game_info(&host.game_id, &guest.player_id).unwrap(),
        info
    );
    let game = lock_game(&handle).unwrap();
    let fired_after: Vec<_> = game.players().iter().map(|p| p.fired()).collect();
    assert_eq!(fired_after, fired_before);
    assert_eq!(game.turn(), host.player_id);
}

#[test]
fn test_games_are_isolated() {
    let engine = engine();
    let (a, _) = started_game(&engine);
    let (b, _) = started_game(&engine);
    engine.shoot(&a.game_id, &a.player_id, 0, 0).unwrap();
    let report = shot(engine.shoot(&b.game_id, &b.player_id, 0, 0).unwrap());
    assert!(report.sunk);
}
