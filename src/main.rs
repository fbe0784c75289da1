use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::time::Duration;

use seabattle::{
    init_logging, local::play_local, Engine, EngineConfig, GameStore, Server, ServerConfig,
    DEFAULT_BIND,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game server.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, default_value_t = 3600, value_parser = clap::value_parser!(u64).range(1..), help = "Evict games idle for this many seconds")]
        game_ttl_secs: u64,
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..), help = "How often to look for idle games")]
        sweep_interval_secs: u64,
        #[arg(long, help = "Accept ships that are not straight contiguous lines")]
        allow_bent_ships: bool,
    },
    /// Play a computer-vs-computer game in this process.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            game_ttl_secs,
            sweep_interval_secs,
            allow_bent_ships,
        } => {
            let config = ServerConfig {
                bind,
                game_ttl: Duration::from_secs(game_ttl_secs),
                sweep_interval: Duration::from_secs(sweep_interval_secs),
                engine: EngineConfig { allow_bent_ships },
            };
            let server = Server::bind(config).await?;
            println!("Server listening on {}", server.local_addr()?);
            server.run().await?;
        }
        Commands::Local { seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            println!("Starting local AI vs AI game (seed {})...", seed);
            let engine = Arc::new(Engine::new(
                Arc::new(GameStore::new()),
                EngineConfig::default(),
            ));
            let summary = play_local(engine, (seed, seed.wrapping_add(1))).await?;
            println!(
                "Game {} won by {} after {} + {} shots",
                summary.game_id, summary.winner, summary.shots[0], summary.shots[1]
            );
        }
    }
    Ok(())
}
