//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::generation::pipeline::run_generation;
use crate::generation::session::GenerationState;
use crate::models::content::{GeneratedContent, UserInput};
use crate::state::AppState;

const EMPTY_FORM_MESSAGE: &str = "Prosím, vyplňte všechna pole, Vaše ctihodnosti.";

/// POST /api/v1/generate
///
/// Runs the whole pipeline for one form submission. The outcome is stored in
/// the session (Success or Failed) and returned to the caller.
///
/// If a newer submission started meanwhile, the session keeps tracking that one
/// and this outcome is only returned to its own caller.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<Json<GeneratedContent>, AppError> {
    if input.profession.trim().is_empty() || input.activities.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_FORM_MESSAGE.to_string()));
    }

    let generation_id = state.session.begin();
    info!(%generation_id, gender = ?input.gender, "Generation started");

    match run_generation(state.backend.as_ref(), &input).await {
        Ok(content) => {
            if state.session.settle(generation_id, Ok(content.clone())) {
                info!(%generation_id, title = %content.title, "Generation succeeded");
            } else {
                info!(%generation_id, "Generation succeeded after being superseded");
            }
            Ok(Json(content))
        }
        Err(err) => {
            if !state.session.settle(generation_id, Err(err.user_message())) {
                info!(%generation_id, "Generation failed after being superseded");
            }
            Err(err)
        }
    }
}

/// GET /api/v1/generation
///
/// Current session state: idle, loading, success (with content) or failed (with message).
pub async fn handle_get_generation(State(state): State<AppState>) -> Json<GenerationState> {
    Json(state.session.snapshot())
}
