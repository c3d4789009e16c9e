//! Axum route handlers for the resume API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::resume::generator::{generate_resume, ResumeInput};
use crate::resume::schema::{Resume, ScrapedData};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub data: ScrapedData,
    #[serde(default)]
    pub use_summarizer: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub resume: Resume,
}

/// POST /api/v1/resume/generate
///
/// Runs the generation pipeline over the scraped data supplied by the caller.
/// `GENERATION_FAILED` is returned when no schema-valid resume could be
/// produced within the retry budget — a partial resume is never returned.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    if request.data.is_empty() {
        return Err(AppError::Validation(
            "data must contain at least one profile source".to_string(),
        ));
    }

    let resume = generate_resume(
        &state.llm,
        ResumeInput::Scraped(request.data),
        request.use_summarizer,
    )
    .await?
    .ok_or(AppError::GenerationFailed)?;

    Ok(Json(GenerateResumeResponse { resume }))
}
