//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::{
    run_analysis, run_follow_up, AnalysisOutcome, FollowUpAnswer, FollowUpRequest,
};
use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::models::AnalysisMode;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields collected from the multipart analysis form.
#[derive(Debug, Default)]
struct AnalysisForm {
    document: Option<UploadedDocument>,
    job_description: Option<String>,
    mode: AnalysisMode,
}

#[derive(Debug, Serialize)]
pub struct ModeInfo {
    pub mode: AnalysisMode,
    pub label: &'static str,
    pub description: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/modes
pub async fn handle_list_modes() -> Json<Vec<ModeInfo>> {
    Json(
        AnalysisMode::ALL
            .into_iter()
            .map(|mode| ModeInfo {
                mode,
                label: mode.label(),
                description: mode.description(),
            })
            .collect(),
    )
}

/// POST /api/v1/analyses
///
/// Multipart form: `resume` (PDF file), `job_description` (optional text),
/// `mode` (optional, defaults to quick_scan). Returns the verbatim analysis and the
/// session id the follow-up question must be sent to.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let form = read_analysis_form(multipart).await?;

    let outcome = run_analysis(
        state.extractor.clone(),
        state.model.as_ref(),
        &state.sessions,
        form.document,
        form.job_description.as_deref(),
        form.mode,
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /api/v1/analyses/:id/follow-up
///
/// Answers one question about a previous analysis. Only reachable with the session id
/// returned by a successful analysis; each session accepts a single question.
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<FollowUpRequest>,
) -> Result<Json<FollowUpAnswer>, AppError> {
    let answer = run_follow_up(
        state.model.as_ref(),
        &state.sessions,
        session_id,
        &request.question,
    )
    .await?;
    Ok(Json(answer))
}

async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisForm, AppError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers submit an empty, unnamed part when no file was picked.
                let nothing_picked =
                    bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty);
                if !nothing_picked {
                    form.document = Some(UploadedDocument::new(bytes, file_name));
                }
            }
            Some("job_description") => {
                form.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("mode") => {
                let raw = field.text().await.map_err(multipart_error)?;
                form.mode = raw
                    .parse::<AnalysisMode>()
                    .map_err(|e| AppError::Validation(e.to_string()))?;
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(e.body_text());
    }
    AppError::Validation(format!("Invalid upload: {}", e.body_text()))
}
