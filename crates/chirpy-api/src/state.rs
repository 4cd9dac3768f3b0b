use std::sync::Arc;

use chirpy_db::Database;
use tracing::error;

use crate::error::ApiError;
use crate::metrics::HitCounter;
use crate::profanity::CensorMode;

pub type AppState = Arc<AppStateInner>;

/// Deployment platform. Only `Dev` may run destructive admin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Dev,
    #[default]
    Prod,
}

impl Platform {
    /// Anything other than the literal `dev` is treated as production.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("dev") => Self::Dev,
            _ => Self::Prod,
        }
    }

    pub fn is_dev(self) -> bool {
        self == Self::Dev
    }
}

pub struct AppStateInner {
    pub db: Database,
    pub hits: HitCounter,
    pub platform: Platform,
    pub censor: CensorMode,
}

impl AppStateInner {
    pub fn new(db: Database, platform: Platform, censor: CensorMode) -> AppState {
        Arc::new(Self {
            db,
            hits: HitCounter::new(),
            platform,
            censor,
        })
    }
}

/// Run blocking database work off the async runtime.
/// Failures surface as `ApiError::Storage` carrying `message`.
pub async fn run_blocking<F, T>(state: &AppState, message: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::storage(message, e)
        })?
        .map_err(|e| ApiError::storage(message, e))
}
