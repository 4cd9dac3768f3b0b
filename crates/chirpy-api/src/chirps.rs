use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, warn};
use uuid::Uuid;

use chirpy_types::api::{
    ChirpResponse, CreateChirpRequest, ValidateChirpRequest, ValidateChirpResponse,
};

use crate::convert::chirp_response;
use crate::error::{ApiError, ApiResult};
use crate::profanity::{CensorMode, CleanedChirp, clean_chirp};
use crate::state::{AppState, run_blocking};

fn validate(body: &str, mode: CensorMode) -> ApiResult<CleanedChirp> {
    let cleaned = clean_chirp(body, mode).inspect_err(|e| warn!("Chirp rejected: {}", e))?;
    if cleaned.flagged {
        info!("Chirp contained blocked words");
    }
    Ok(cleaned)
}

pub async fn create_chirp(
    State(state): State<AppState>,
    payload: Result<Json<CreateChirpRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ChirpResponse>)> {
    let Json(req) = payload?;

    let cleaned = validate(&req.body, state.censor)?;
    let user_id = req.user_id.filter(|id| !id.is_empty());
    let chirp_id = Uuid::new_v4().to_string();

    let row = run_blocking(&state, "Failed to create chirp", move |s| {
        s.db.create_chirp(&chirp_id, &cleaned.body, user_id.as_deref())
    })
    .await?;

    info!("Chirp {} created", row.id);
    Ok((StatusCode::CREATED, Json(chirp_response(row)?)))
}

pub async fn list_chirps(State(state): State<AppState>) -> ApiResult<Json<Vec<ChirpResponse>>> {
    let rows = run_blocking(&state, "Failed to get chirps", |s| s.db.get_chirps()).await?;

    let chirps = rows.into_iter().map(chirp_response).collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(chirps))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> ApiResult<Json<ChirpResponse>> {
    let row = run_blocking(&state, "Failed to get chirp", move |s| s.db.get_chirp(&chirp_id))
        .await?
        .ok_or(ApiError::NotFound("Chirp not found"))?;

    Ok(Json(chirp_response(row)?))
}

/// Run the filter without storing anything.
pub async fn validate_chirp(
    State(state): State<AppState>,
    payload: Result<Json<ValidateChirpRequest>, JsonRejection>,
) -> ApiResult<Json<ValidateChirpResponse>> {
    let Json(req) = payload?;
    let cleaned = validate(&req.body, state.censor)?;

    Ok(Json(ValidateChirpResponse {
        cleaned_body: cleaned.body,
    }))
}
