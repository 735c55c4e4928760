use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use flowery::config::Config;
use flowery::{build_app, cli, db};

/// flowery - flower catalog search and monthly recommendation service
#[derive(Parser)]
#[command(name = "flowery")]
#[command(about = "Flower catalog search and monthly recommendation service")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Load flowers and their hashtags from a JSON file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let pool = db::init_pool(&config.database_url).await?;

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(pool, config.bind_addr).await?,
        Commands::Import { file } => {
            let imported = cli::import_flowers(&pool, &file).await?;
            println!("Imported {imported} flowers");
        }
    }

    Ok(())
}

async fn serve(pool: SqlitePool, addr: SocketAddr) -> std::io::Result<()> {
    let app = build_app(pool);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await
}
