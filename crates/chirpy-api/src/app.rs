use std::path::PathBuf;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{APP_PREFIX, count_hits};
use crate::state::AppState;
use crate::{admin, chirps, users};

/// Directories behind the two file-serving routes.
#[derive(Debug, Clone)]
pub struct StaticDirs {
    /// Served under `/app`, counted by the hit counter.
    pub app: PathBuf,
    /// Served under `/assets`, not counted.
    pub assets: PathBuf,
}

impl Default for StaticDirs {
    fn default() -> Self {
        Self {
            app: PathBuf::from("./static"),
            assets: PathBuf::from("./assets"),
        }
    }
}

/// GET /api/healthz
pub async fn health() -> &'static str {
    "OK"
}

pub fn router(state: AppState, dirs: &StaticDirs) -> Router {
    let counted_files = Router::new()
        .nest_service(APP_PREFIX, ServeDir::new(&dirs.app))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    let api_routes = Router::new()
        .route("/api/healthz", get(health))
        .route("/api/reset", post(admin::reset))
        .route("/api/users", post(users::create_user))
        .route("/api/login", post(users::login))
        .route("/api/validate_chirp", post(chirps::validate_chirp))
        .route("/api/chirps", get(chirps::list_chirps).post(chirps::create_chirp))
        .route("/api/chirps/{chirp_id}", get(chirps::get_chirp))
        .route("/admin/metrics", get(admin::metrics))
        .with_state(state);

    Router::new()
        .merge(counted_files)
        .nest_service("/assets", ServeDir::new(&dirs.assets))
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
