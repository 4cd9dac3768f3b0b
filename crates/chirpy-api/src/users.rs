use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, warn};
use uuid::Uuid;

use chirpy_types::api::{CreateUserRequest, LoginRequest, UserResponse};

use crate::convert::user_response;
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, run_blocking};

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(req) = payload?;

    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }

    let user_id = Uuid::new_v4().to_string();

    // Argon2 is CPU-bound, so hash on the blocking pool alongside the insert
    let row = run_blocking(&state, "Failed to create user", move |s| {
        let hash = chirpy_auth::hash_password(&req.password)?;
        s.db.create_user(&user_id, &req.email, &hash)
    })
    .await?;

    info!("User {} created", row.id);
    Ok(Json(user_response(row)?))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(req) = payload?;

    let user = run_blocking(&state, "Failed to log in", move |s| {
        let Some(user) = s.db.get_user_by_email(&req.email)? else {
            return Ok(None);
        };
        let valid = chirpy_auth::verify_password(&req.password, &user.password)?;
        Ok(valid.then_some(user))
    })
    .await?;

    match user {
        Some(user) => Ok(Json(user_response(user)?)),
        None => {
            warn!("Failed login attempt");
            Err(ApiError::Unauthorized)
        }
    }
}
