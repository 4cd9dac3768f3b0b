//! API error type and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use chirpy_types::api::ErrorBody;

use crate::profanity::ChirpError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body was not valid JSON for the expected shape.
    #[error("invalid request body: {0}")]
    Decode(#[from] JsonRejection),

    /// Well-formed request that breaks a business rule.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("incorrect email or password")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    /// Database or hashing failure. `message` is what the client sees.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn storage(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            message,
            source: source.into(),
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Decode(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            Self::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Incorrect email or password".to_string())
            }
            Self::Forbidden => return StatusCode::FORBIDDEN.into_response(),
            Self::Storage { message, source } => {
                error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}
