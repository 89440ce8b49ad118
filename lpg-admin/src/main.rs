//! lpg-admin - Learning Plan Generator admin dashboard
//!
//! **Module Identity:**
//! - Name: lpg-admin
//! - Port: 5811
//!
//! Read-only view of users, plans, ratings and reported issues.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lpg_common::config::{self, AdminCredentials};
use tracing::{error, info};

use lpg_admin::{build_router, AppState};

/// Command-line arguments for lpg-admin
#[derive(Parser, Debug)]
#[command(name = "lpg-admin")]
#[command(about = "Learning Plan Generator admin dashboard")]
#[command(version)]
struct Args {
    /// Root folder holding lpg.db
    #[arg(short, long, env = "LPG_ROOT")]
    root_folder: Option<String>,

    /// TOML config file (default: ~/.config/lpg/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:5811", env = "LPG_ADMIN_BIND")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.as_str().into()),
        )
        .init();

    info!(
        "Starting LPG admin dashboard (lpg-admin) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let credentials = AdminCredentials::resolve(&toml_config)?;
    info!("Admin login configured for {}", credentials.email);

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match lpg_common::db::connect_readonly(&db_path).await {
        Ok(pool) => {
            info!("Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool, credentials);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("lpg-admin listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
