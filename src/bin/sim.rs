use std::sync::Arc;

use seabattle::{local::play_local, Engine, EngineConfig, GameStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let engine = Arc::new(Engine::new(
        Arc::new(GameStore::new()),
        EngineConfig::default(),
    ));
    let summary = play_local(engine, (seed1, seed2)).await?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
