//! RpgWorld Engine - operator entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rpgworld_domain::{ActorId, ActorKind, PlaceId, UniverseId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rpgworld_engine::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, NarrationStore},
    notify::TracingNotificationSink,
    ports::{ClockPort, NotificationSink, WorldRepo},
    sqlite::{self, SqliteChatSink, SqliteWorldRepo},
};
use rpgworld_engine::App;

#[derive(Parser)]
#[command(name = "rpgworld-engine", about = "Move actors and map universes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a universe map as Graphviz DOT (or JSON)
    Map {
        universe_id: UniverseId,
        #[arg(long)]
        json: bool,
    },
    /// List the visible exits of a place
    Exits { place_id: PlaceId },
    /// Move a character, vehicle or mob one step
    Move {
        kind: ActorKind,
        actor_id: ActorId,
        direction: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so map output can be piped.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rpgworld_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;

    tracing::info!(database = %config.database_path, "Opening world database");
    let pool = sqlite::connect(&config.database_path).await?;
    sqlite::ensure_schema(&pool).await?;

    let world: Arc<dyn WorldRepo> = Arc::new(SqliteWorldRepo::new(pool.clone()));
    let notifications: Arc<dyn NotificationSink> = match config.narration_store {
        NarrationStore::Log => Arc::new(TracingNotificationSink::new()),
        NarrationStore::Sqlite => Arc::new(SqliteChatSink::new(pool, config.public_logs)),
    };
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let app = App::new(world, notifications, clock, config.narration);

    match cli.command {
        Commands::Map { universe_id, json } => {
            let graph = app.use_cases.map.execute(universe_id).await?;
            if json {
                println!("{}", graph.to_json()?);
            } else {
                print!("{}", graph.to_dot());
            }
        }
        Commands::Exits { place_id } => {
            let exits = app.use_cases.movement.list_exits.execute(place_id).await?;
            for exit in exits {
                println!("{}\t{}", exit.direction, exit.destination_id);
            }
        }
        Commands::Move {
            kind,
            actor_id,
            direction,
        } => {
            let moved = app
                .use_cases
                .movement
                .resolve_move
                .execute(actor_id, kind, &direction)
                .await?;
            println!(
                "{} moved from {} to {}",
                moved.name, moved.previous_place_id, moved.place_id
            );
        }
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
