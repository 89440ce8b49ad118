//! lpg-ui - Learning Plan Generator user app
//!
//! **Module Identity:**
//! - Name: lpg-ui
//! - Port: 5810
//!
//! Users sign up, answer the plan questions and browse their saved plans.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lpg_common::config::{self, OpenAiSettings, SearchKeys};
use tracing::{info, warn};

use lpg_ui::services::{
    HttpLinkChecker, LinkChecker, OpenAiClient, PlanGenerator, SerpApiClient, YouTubeClient,
};
use lpg_ui::{build_router, AppState};

/// Command-line arguments for lpg-ui
#[derive(Parser, Debug)]
#[command(name = "lpg-ui")]
#[command(about = "Learning Plan Generator user app")]
#[command(version)]
struct Args {
    /// Root folder holding lpg.db
    #[arg(short, long, env = "LPG_ROOT")]
    root_folder: Option<String>,

    /// TOML config file (default: ~/.config/lpg/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:5810", env = "LPG_UI_BIND")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its log level can seed the filter
    let toml_config = config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.as_str().into()),
        )
        .init();

    // Build identification first, before any slow startup work
    info!(
        "Starting LPG user app (lpg-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let db_path = config::database_path(&root_folder);
    info!("Database: {}", db_path.display());

    let db_pool = lpg_common::db::init_database(&db_path)
        .await
        .context("Failed to open database")?;
    info!("Database connection established");

    let openai = OpenAiSettings::resolve(&toml_config)?;
    info!(model = %openai.model, "Completion client configured");
    let llm = OpenAiClient::new(openai)?;

    let link_checker: Arc<dyn LinkChecker> = Arc::new(HttpLinkChecker::new()?);
    let mut generator = PlanGenerator::new(Arc::new(llm), link_checker.clone());

    let keys = SearchKeys::resolve(&toml_config);
    match keys.serpapi {
        Some(key) => {
            generator = generator.with_web_search(Arc::new(SerpApiClient::new(key, link_checker)?));
            info!("Fallback resource search enabled");
        }
        None => warn!("No SerpAPI key configured; missing resource types will not be backfilled"),
    }
    match keys.youtube {
        Some(key) => {
            generator = generator.with_video_search(Arc::new(YouTubeClient::new(key)?));
            info!("Best video lookup enabled");
        }
        None => warn!("No YouTube API key configured; weeks will not get a best video"),
    }

    let state = AppState::new(db_pool, generator);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("Listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
