//! Axum route handlers for the Poster API.

use anyhow::anyhow;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::errors::AppError;
use crate::render::poster::DOWNLOAD_FILENAME;
use crate::render::{Poster, PosterError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PosterResponse {
    pub poster_url: String,
    pub width: u32,
    pub height: u32,
}

/// Composes the poster for the session's current content.
/// A failed composition leaves the generated content in place.
async fn compose_current(state: &AppState) -> Result<Poster, AppError> {
    let content = state
        .session
        .current_content()
        .ok_or_else(|| AppError::NotFound("Zatím nebyl vygenerován žádný obsah.".to_string()))?;

    state.composer.compose(&content).await.map_err(|e| {
        error!("Failed to load images for poster: {e}");
        poster_failure(e)
    })
}

/// A render task that died is an internal fault; everything else is a poster error.
fn poster_failure(err: PosterError) -> AppError {
    match err {
        PosterError::Join(msg) => AppError::Internal(anyhow!("render task failed: {msg}")),
        other => AppError::Poster(other),
    }
}

/// GET /api/v1/poster
pub async fn handle_get_poster(
    State(state): State<AppState>,
) -> Result<Json<PosterResponse>, AppError> {
    let poster = compose_current(&state).await?;
    Ok(Json(PosterResponse {
        poster_url: poster.data_url(),
        width: poster.width,
        height: poster.height,
    }))
}

/// GET /api/v1/poster/download
///
/// Returns the PNG as an attachment with a fixed filename.
pub async fn handle_download_poster(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let poster = compose_current(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        poster.png,
    ))
}
