use anyhow::Context;
use chrono::{DateTime, Utc};

use chirpy_db::models::{ChirpRow, UserRow};
use chirpy_types::api::{ChirpResponse, UserResponse};

use crate::error::{ApiError, ApiResult};

const CORRUPT_RECORD: &str = "Corrupt record in database";

fn parse_timestamp(raw: &str, id: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("timestamp '{}' on row '{}'", raw, id))
        .map_err(|e| ApiError::storage(CORRUPT_RECORD, e))
}

/// Public view of a user row; the password hash is dropped here.
pub fn user_response(row: UserRow) -> ApiResult<UserResponse> {
    Ok(UserResponse {
        created_at: parse_timestamp(&row.created_at, &row.id)?,
        updated_at: parse_timestamp(&row.updated_at, &row.id)?,
        email: row.email,
        id: row.id,
    })
}

pub fn chirp_response(row: ChirpRow) -> ApiResult<ChirpResponse> {
    Ok(ChirpResponse {
        created_at: parse_timestamp(&row.created_at, &row.id)?,
        updated_at: parse_timestamp(&row.updated_at, &row.id)?,
        body: row.body,
        user_id: row.user_id,
        id: row.id,
    })
}
