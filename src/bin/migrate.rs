//! Applies or reverts the schema migrations against `DATABASE_URL`.
//!
//! ```text
//! migrate up     # apply pending migrations
//! migrate down   # revert every applied migration
//! ```

use clap::{Parser, Subcommand};
use storefront_api::{config::Config, db};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migrate", about = "Manage the storefront database schema")]
struct Cli {
    #[command(subcommand)]
    direction: Direction,
}

#[derive(Subcommand)]
enum Direction {
    Up,
    Down,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = db::connect(&config).await?;

    match cli.direction {
        Direction::Up => {
            db::MIGRATOR.run(&pool).await?;
            tracing::info!("migrations applied");
        }
        Direction::Down => {
            db::MIGRATOR.undo(&pool, 0).await?;
            tracing::info!("migrations reverted");
        }
    }

    pool.close().await;
    Ok(())
}
