//! Cinelog Development Utility
//!
//! Connects to a local MongoDB, ensures the catalog indexes, optionally
//! seeds fixture data, and prints the most-active-commenters report.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CL_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `CL_MONGO_DB` | `cinelog` | MongoDB database name |
//! | `RUST_LOG` | `info` | Log level |

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cl_catalog::mongo;
use cl_catalog::repository::{indexes, CommentRepository};
use cl_catalog::seed::DevDataSeeder;

/// Cinelog Development Utility
#[derive(Parser, Debug)]
#[command(name = "cl-dev")]
#[command(about = "Cinelog dev utility - seed local data and print catalog reports")]
struct Args {
    /// MongoDB connection URL
    #[arg(long, env = "CL_MONGO_URL", default_value = "mongodb://localhost:27017")]
    mongo_url: String,

    /// MongoDB database name
    #[arg(long, env = "CL_MONGO_DB", default_value = "cinelog")]
    mongo_db: String,

    /// Seed fixture users and comments when the database is empty
    #[arg(long, env = "CL_DEV_SEED", default_value = "false")]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    let args = Args::parse();

    info!("Connecting to MongoDB: {}/{}", args.mongo_url, args.mongo_db);
    let client = mongo::connect(&args.mongo_url).await?;
    let db = client.database(&args.mongo_db);

    indexes::ensure_indexes(&db).await?;

    if args.seed {
        let seeder = DevDataSeeder::new(&client, &db);
        if let Err(e) = seeder.seed().await {
            tracing::warn!("Dev data seeding skipped (data may already exist): {}", e);
        }
    }

    let comment_repo = CommentRepository::new(&db);
    let report = comment_repo.most_active_commenters().await?;

    info!("Most active commenters ({} rows):", report.len());
    for (rank, critic) in report.iter().enumerate() {
        info!("  #{:<2} {:<40} {} comments", rank + 1, critic.email, critic.count);
    }

    Ok(())
}
