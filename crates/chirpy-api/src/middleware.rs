use axum::{
    extract::{OriginalUri, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Mount point of the counted file server.
pub const APP_PREFIX: &str = "/app";

/// Count every request that reaches the wrapped file server.
///
/// The bare prefix is redirected to its directory form without being
/// counted; the follow-up request is.
pub async fn count_hits(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    req: Request,
    next: Next,
) -> Response {
    if uri.path() == APP_PREFIX {
        let location = match uri.query() {
            Some(query) => format!("{APP_PREFIX}/?{query}"),
            None => format!("{APP_PREFIX}/"),
        };
        return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
    }

    state.hits.increment();
    next.run(req).await
}
