//! Toska daemon - restaurant chatbot HTTP server
//!
//! Serves the chat page, the menu API, and health. The QA model is loaded
//! once at start; a missing checkpoint downgrades chat to the canned reply
//! instead of refusing to start, so the menu endpoints stay available.

mod assets;
mod routes;
mod server;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use toska_common::{ChatEngine, MenuStore, QaEngine, ToskaConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toskad")]
#[command(about = "Toska restaurant chatbot daemon", long_about = None)]
#[command(version)]
struct Args {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from the config
    #[arg(long)]
    bind: Option<String>,

    /// Override the database path from the config
    #[arg(long)]
    db: Option<PathBuf>,

    /// Use an in-memory database (for demos and tests)
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    info!("toskad v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = ToskaConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(db) = args.db {
        config.db_path = db;
    }

    let store = if args.ephemeral {
        warn!("Running with an in-memory database; menu is lost on exit");
        MenuStore::open_in_memory()?
    } else {
        MenuStore::open(&config.db_path)?
    };
    let store = Arc::new(store);
    info!(
        "Menu store open at {} ({} items)",
        store.path().display(),
        store.count()?
    );

    // Chat still works without the model: trigger keywords hit the menu
    // table and everything else gets the canned context line.
    let qa = match QaEngine::load(&config.model_dir, config.max_answer_tokens) {
        Ok(engine) => Some(Arc::new(engine)),
        Err(e) => {
            warn!("QA model unavailable, chat falls back to canned replies: {e:#}");
            None
        }
    };

    let chat = ChatEngine::new(store.clone(), qa, &config);
    let state = server::AppState::new(store, chat, config.greeting.clone());

    server::run(state, &config.bind_addr).await
}
