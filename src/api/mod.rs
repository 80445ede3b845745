//! HTTP interface.
//!
//! Axum router serving the playlist form page, a JSON analysis endpoint
//! and a health check. Every failure is recovered here and turned into
//! an error page or error body; nothing escapes to the server loop.

pub mod routes;
pub mod state;
pub mod views;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::aggregate::PlaylistError;
use state::AppState;

/// Shown for a link that cannot be read or a playlist that cannot be fetched.
pub const INVALID_LINK_MESSAGE: [&str; 2] = [
    "Invalid playlist link",
    "Please try again with correct parameters",
];

/// Shown for anything else.
pub const UNEXPECTED_ERROR_MESSAGE: [&str; 2] =
    ["An unexpected error occurred", "Please try again later"];

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    BadGateway(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<PlaylistError> for ApiError {
    fn from(err: PlaylistError) -> Self {
        match err {
            PlaylistError::InvalidReference(e) => ApiError::BadRequest(e.to_string()),
            e @ PlaylistError::Fetch { .. } => ApiError::BadGateway(e.to_string()),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(routes::home::show_form).post(routes::home::analyze_form),
        )
        .route("/api/playlist", post(routes::playlist::analyze_playlist))
        .route("/health", get(routes::health::health))
        .layer(CatchPanicLayer::custom(views::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::models::{InvalidPlaylistReference, PlaylistId};

    #[test]
    fn test_invalid_reference_maps_to_bad_request() {
        let err: ApiError =
            PlaylistError::InvalidReference(InvalidPlaylistReference("x y".to_string())).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_fetch_error_maps_to_bad_gateway() {
        let err: ApiError = PlaylistError::Fetch {
            playlist_id: PlaylistId::extract("PL1").unwrap(),
            source: FetchError::HttpStatus {
                status: 500,
                message: "Internal Server Error".to_string(),
            },
        }
        .into();

        assert!(err.to_string().contains("PL1"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
