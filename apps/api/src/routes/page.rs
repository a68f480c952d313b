use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::ui::render_page;

const MAX_FEEDBACK_CHARS: usize = 5000;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub message: String,
}

/// GET /
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_page(state.config.ui_theme))
}

/// POST /api/v1/feedback
/// Feedback is not stored; it is written to the log.
pub async fn feedback_handler(Json(req): Json<FeedbackRequest>) -> Result<StatusCode, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("feedback cannot be empty".to_string()));
    }
    if message.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(AppError::Validation(format!(
            "feedback must be at most {MAX_FEEDBACK_CHARS} characters"
        )));
    }

    info!(feedback = %message, "User feedback received");
    Ok(StatusCode::NO_CONTENT)
}
