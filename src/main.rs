use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard::config::{resolve_db_path, ServerConfig};
use taskboard::{api, Database};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Project and task tracking API backed by a JSON file")]
struct Cli {
    /// Path to the JSON database file
    #[arg(long, global = true, env = "TASKBOARD_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = ServerConfig::DEFAULT_HOST)]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, env = "PORT", default_value_t = ServerConfig::DEFAULT_PORT)]
        port: u16,
    },
    /// Create an empty database file
    Init {
        /// Overwrite an existing database
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "taskboard=debug,taskboard_core=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            serve(ServerConfig::new(host, port, cli.db)?).await?;
        }
        Some(Commands::Init { force }) => {
            let path = resolve_db_path(cli.db)?;
            let db = Database::open(&path);
            if force {
                db.reset()?;
                println!("Reset database at {}", path.display());
            } else if db.initialize()? {
                println!("Created database at {}", path.display());
            } else {
                println!("Database already exists at {} (use --force to reset)", path.display());
            }
        }
        None => {
            // Default: start server
            let config = ServerConfig::new(
                ServerConfig::DEFAULT_HOST,
                ServerConfig::DEFAULT_PORT,
                cli.db,
            )?;
            serve(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Taskboard server on port {}", config.port);

    let db = Database::open(&config.db_path);
    db.initialize()?;
    tracing::info!("Using database at {}", config.db_path.display());

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Taskboard server listening on http://{}", config.bind_addr());
    tracing::info!(
        "API endpoints available at http://{0}/tasks and http://{0}/projects",
        config.bind_addr()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Taskboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
