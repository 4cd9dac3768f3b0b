use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};
use tracing::{info, warn};

use chirpy_types::api::ResetRequest;

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, run_blocking};

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>
",
        state.hits.load()
    ))
}

/// POST /api/reset — dev only. Deletes one user by email and zeroes the hit counter.
pub async fn reset(
    State(state): State<AppState>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    if !state.platform.is_dev() {
        warn!("Reset refused: platform is not dev");
        return Err(ApiError::Forbidden);
    }

    let Json(req) = payload?;

    let removed = run_blocking(&state, "Failed to delete user", move |s| {
        s.db.delete_user_by_email(&req.email)
    })
    .await?;
    let hits = state.hits.reset();

    info!("Reset: removed {} user(s), cleared {} hits", removed, hits);
    Ok("OK")
}
