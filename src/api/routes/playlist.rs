use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::PlaylistReport;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub link: String,
}

pub async fn analyze_playlist(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<PlaylistReport>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let report = state.analyze(&request.link).await.map_err(|e| {
        tracing::warn!("Playlist analysis failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(report))
}
