//! Self-play: two computer players against one engine over in-memory links.

use std::sync::Arc;

use anyhow::anyhow;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::ai::Gunner;
use crate::config::BOARD_SIZE;
use crate::engine::Engine;
use crate::fleet::Fleet;
use crate::game::ShotResponse;
use crate::skeleton::Skeleton;
use crate::stub::Stub;
use crate::transport::in_memory::InMemoryTransport;

/// Result of a self-played match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub game_id: String,
    /// `"player1"` (the creator) or `"player2"`.
    pub winner: String,
    pub shots: [usize; 2],
}

/// Connect a client to `engine` through a fresh in-memory link.
pub fn connect(engine: Arc<Engine>) -> Stub<InMemoryTransport> {
    let (server_side, client_side) = InMemoryTransport::pair();
    tokio::spawn(async move {
        let mut skeleton = Skeleton::new(engine, server_side);
        if let Err(e) = skeleton.run().await {
            warn!("in-memory session ended with error: {}", e);
        }
    });
    Stub::new(client_side)
}

/// Play a full game between two [`Gunner`]s seeded with `seeds`.
pub async fn play_local(engine: Arc<Engine>, seeds: (u64, u64)) -> anyhow::Result<MatchSummary> {
    let mut rngs = [
        SmallRng::seed_from_u64(seeds.0),
        SmallRng::seed_from_u64(seeds.1),
    ];
    let stubs = [connect(engine.clone()), connect(engine)];

    let host = stubs[0].create_game().await?;
    let guest = stubs[1].join_game(&host.game_id).await?;
    let game_id = host.game_id.clone();
    let ids = [host.player_id, guest.player_id];

    for (i, stub) in stubs.iter().enumerate() {
        let fleet = Fleet::random(&mut rngs[i])?;
        stub.set_ships(&game_id, &ids[i], fleet.to_cells()).await?;
    }
    info!("local game {} started", game_id);

    let mut gunners = [Gunner::new(), Gunner::new()];
    let mut shots = [0usize; 2];
    let mut turn = 0usize;
    // Each player can fire at most once per cell.
    let max_shots = 2 * (BOARD_SIZE as usize).pow(2);
    while shots.iter().sum::<usize>() < max_shots {
        let target = gunners[turn]
            .select_target(&mut rngs[turn])
            .ok_or_else(|| anyhow!("player{} ran out of targets", turn + 1))?;
        shots[turn] += 1;
        match stubs[turn]
            .shoot(&game_id, &ids[turn], target.x, target.y)
            .await?
        {
            ShotResponse::Shot(report) => {
                gunners[turn].record(target, &report);
                if let Some(winner) = report.winner {
                    return summary(game_id, &ids, &winner, shots);
                }
                if report.next_turn != ids[turn] {
                    turn = 1 - turn;
                }
            }
            ShotResponse::GameOver { winner } => {
                return summary(game_id, &ids, &winner, shots);
            }
        }
    }
    Err(anyhow!("game {} did not finish", game_id))
}

fn summary(
    game_id: String,
    ids: &[String; 2],
    winner: &str,
    shots: [usize; 2],
) -> anyhow::Result<MatchSummary> {
    let idx = ids
        .iter()
        .position(|id| id == winner)
        .ok_or_else(|| anyhow!("unknown winner {}", winner))?;
    Ok(MatchSummary {
        game_id,
        winner: format!("player{}", idx + 1),
        shots,
    })
}
