//! Resume analysis: orchestrates extraction, prompt construction and the model call.
//!
//! Flow: extract text (blocking pool) → build mode prompt → GenerativeModel::generate →
//!       store AnalysisSession → return result.
//! Follow-up: take AnalysisSession → build follow-up prompt → GenerativeModel::generate.
//!
//! Every failure is fatal to the current request only. Nothing is retried.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{ExtractedText, ExtractionError, TextExtractor, UploadedDocument};
use crate::llm_client::GenerativeModel;
use crate::models::{AnalysisMode, AnalysisSession};

pub mod handlers;
pub mod prompts;
pub mod sessions;

pub use sessions::SessionStore;

use prompts::{build_analysis_prompt, build_follow_up_prompt, provided_job_description};

/// Returned to the caller after a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub session_id: Uuid,
    pub mode: AnalysisMode,
    pub analysis: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpAnswer {
    pub answer: String,
}

/// Runs text extraction on the blocking pool. A panic inside the PDF backend is
/// reported as an unreadable document.
pub async fn extract_document(
    extractor: Arc<dyn TextExtractor>,
    document: Option<UploadedDocument>,
) -> Result<ExtractedText, AppError> {
    // Reject before touching the blocking pool.
    let document = document.ok_or(ExtractionError::MissingInput)?;

    let text = tokio::task::spawn_blocking(move || extractor.extract(Some(&document)))
        .await
        .map_err(|e| ExtractionError::Unreadable(format!("PDF decoder aborted: {e}")))??;
    Ok(text)
}

/// Runs one analysis and opens a session for its follow-up question.
pub async fn run_analysis(
    extractor: Arc<dyn TextExtractor>,
    model: &dyn GenerativeModel,
    sessions: &SessionStore,
    document: Option<UploadedDocument>,
    job_description: Option<&str>,
    mode: AnalysisMode,
) -> Result<AnalysisOutcome, AppError> {
    let text = extract_document(extractor, document).await?;
    let job_description = provided_job_description(job_description);
    info!(
        "Running {} analysis: resume_chars={}, job_description={}",
        mode,
        text.as_str().chars().count(),
        job_description.is_some()
    );

    let prompt = build_analysis_prompt(&text, job_description, mode);
    let analysis = model.generate(text.as_str(), &prompt).await?;

    let session = AnalysisSession {
        id: Uuid::new_v4(),
        mode,
        resume_text: text.into_string(),
        analysis: analysis.clone(),
        created_at: Utc::now(),
    };
    let session_id = session.id;
    sessions.insert(session);
    debug!("Opened analysis session {session_id} ({} open)", sessions.len());

    Ok(AnalysisOutcome {
        session_id,
        mode,
        analysis,
    })
}

/// Answers the single follow-up question allowed for an analysis session.
/// The session is consumed whether or not the model call succeeds.
pub async fn run_follow_up(
    model: &dyn GenerativeModel,
    sessions: &SessionStore,
    session_id: Uuid,
    question: &str,
) -> Result<FollowUpAnswer, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let session = sessions.take(session_id).ok_or_else(|| {
        AppError::NoAnalysisSession(format!(
            "No analysis found for session {session_id}. Run an analysis before asking a question."
        ))
    })?;

    info!("Answering follow-up for {} session {session_id}", session.mode);
    let prompt = build_follow_up_prompt(&session.resume_text, &session.analysis, question);
    let answer = model.generate(&session.resume_text, &prompt).await?;

    Ok(FollowUpAnswer { answer })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::extraction::{concat_pages, ExtractedText, ExtractionError, TextExtractor, UploadedDocument};
    use crate::llm_client::{GenerativeModel, LlmError};

    /// Treats the upload as UTF-8 with pages separated by form feeds.
    pub struct FormFeedExtractor;

    impl TextExtractor for FormFeedExtractor {
        fn extract(&self, document: Option<&UploadedDocument>) -> Result<ExtractedText, ExtractionError> {
            let document = document.ok_or(ExtractionError::MissingInput)?;
            let raw = std::str::from_utf8(&document.bytes)
                .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
            if raw.is_empty() {
                return concat_pages(Vec::<&str>::new());
            }
            concat_pages(raw.split('\u{c}'))
        }
    }

    pub struct PanickingExtractor;

    impl TextExtractor for PanickingExtractor {
        fn extract(&self, _document: Option<&UploadedDocument>) -> Result<ExtractedText, ExtractionError> {
            panic!("malformed cross-reference table");
        }
    }

    /// Records every call and answers with a canned reply, or fails if `fail_with` is set.
    #[derive(Default)]
    pub struct RecordingModel {
        pub calls: Mutex<Vec<(String, String)>>,
        pub reply: String,
        pub fail_with: Option<u16>,
    }

    impl RecordingModel {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Default::default()
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                fail_with: Some(status),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for RecordingModel {
        async fn generate(&self, document_text: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((document_text.to_string(), prompt.to_string()));
            match self.fail_with {
                Some(status) => Err(LlmError::Api {
                    status,
                    message: "quota exceeded".to_string(),
                }),
                None => Ok(self.reply.clone()),
            }
        }

        fn model_name(&self) -> &str {
            "recording-model"
        }
    }
}
