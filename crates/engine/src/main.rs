//! Shardforge Engine - Main entry point.
//!
//! Loads configuration, validates the static rule tables and prepares the
//! progression store.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shardforge_engine::infrastructure::config::EngineConfig;
use shardforge_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shardforge_engine=debug,shardforge_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shardforge Engine");

    let config = EngineConfig::from_env()?;
    tracing::info!(
        progression_db = %config.progression_db,
        requirement_mode = ?config.requirement_mode,
        "Loaded configuration"
    );

    let app = App::from_config(&config).await?;

    let talents: usize = app.rules.trees().map(|tree| tree.nodes().len()).sum();
    tracing::info!(
        paths = app.rules.paths().count(),
        talents,
        "Rule tables validated"
    );

    tracing::info!("Progression store ready");
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
