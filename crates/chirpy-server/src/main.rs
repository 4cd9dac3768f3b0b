mod config;

use tracing::{info, warn};

use chirpy_api::{AppStateInner, router};
use chirpy_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,chirpy_api=debug,chirpy_db=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.platform.is_dev() {
        warn!("PLATFORM=dev: /api/reset is enabled");
    }

    // Init database
    let db = Database::open(&config.db_url)?;

    let state = AppStateInner::new(db, config.platform, config.censor);
    let app = router(state, &config.static_dirs);

    let addr = config.addr().await?;
    info!("Chirpy server listening on {}", addr);
    info!(
        "Serving /app from {} and /assets from {}",
        config.static_dirs.app.display(),
        config.static_dirs.assets.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
