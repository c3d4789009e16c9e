//! Resume generator — the schema-validated retry loop around the completion
//! client.
//!
//! Flow: (optional summarizer) → build prompt → completion call → parse →
//! validate → retry with structured field errors, up to MAX_ATTEMPTS.
//! Transport and API errors propagate immediately; only structural failures
//! of the response body are retried.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, CompletionBackend};
use crate::resume::prompts::{build_resume_prompt, PromptMode, ResumePrompt};
use crate::resume::schema::{validate_resume, FieldError, Resume, ScrapedData, SummarizedData};
use crate::resume::summarizer::summarize;

/// Total completion attempts per generation request, initial call included.
const MAX_ATTEMPTS: u32 = 3;
/// Fixed pause between attempts. Unconditional, never jittered.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Input to the generator: raw scraped data or an already-summarized
/// projection. `Summarized` always takes the pre-summarized prompt path;
/// the `use_summarizer` flag only applies to `Scraped`.
#[derive(Debug, Clone)]
pub enum ResumeInput {
    Scraped(ScrapedData),
    Summarized(SummarizedData),
}

// ────────────────────────────────────────────────────────────────────────────
// Retry policy (pure)
// ────────────────────────────────────────────────────────────────────────────

/// What to do after an attempt whose response failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextAction {
    /// Attempts remain: re-prompt with the field errors appended.
    RetryWithCorrection,
    /// Final attempt exhausted: report no result.
    Fail,
}

fn after_failed_attempt(attempt: u32) -> NextAction {
    if attempt < MAX_ATTEMPTS {
        NextAction::RetryWithCorrection
    } else {
        NextAction::Fail
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates a schema-valid resume, or `Ok(None)` when no valid resume could
/// be produced within the retry budget. A partial resume is never returned.
pub async fn generate_resume(
    llm: &dyn CompletionBackend,
    input: ResumeInput,
    use_summarizer: bool,
) -> Result<Option<Resume>, AppError> {
    let prompt = resolve_prompt(llm, input, use_summarizer).await?;
    run_generation_loop(llm, prompt).await
}

/// Selects the prompt mode and payload. Runs the summarizer when asked and
/// falls back to raw scraped data if it comes back empty.
async fn resolve_prompt(
    llm: &dyn CompletionBackend,
    input: ResumeInput,
    use_summarizer: bool,
) -> Result<ResumePrompt, AppError> {
    let (mode, payload) = match input {
        ResumeInput::Scraped(scraped) if use_summarizer => match summarize(llm, &scraped).await {
            Some(summary) => (PromptMode::PreSummarized, to_payload(&summary)?),
            None => {
                warn!("summarizer unavailable, falling back to raw scraped data");
                (PromptMode::RawScraped, to_payload(&scraped)?)
            }
        },
        ResumeInput::Scraped(scraped) => (PromptMode::RawScraped, to_payload(&scraped)?),
        ResumeInput::Summarized(summary) => (PromptMode::PreSummarized, to_payload(&summary)?),
    };
    Ok(build_resume_prompt(mode, &payload))
}

async fn run_generation_loop(
    llm: &dyn CompletionBackend,
    prompt: ResumePrompt,
) -> Result<Option<Resume>, AppError> {
    let mut user_content = prompt.user_content.clone();

    for attempt in 1..=MAX_ATTEMPTS {
        info!("resume generation attempt {attempt}/{MAX_ATTEMPTS}");
        let text = llm.complete(prompt.system, &user_content).await?;

        match parse_and_validate(&text) {
            Ok(resume) => {
                info!("resume validated on attempt {attempt}");
                return Ok(Some(resume));
            }
            Err(errors) => {
                warn!(
                    "attempt {attempt} failed validation with {} error(s): {}",
                    errors.len(),
                    format_errors(&errors)
                );
                match after_failed_attempt(attempt) {
                    NextAction::RetryWithCorrection => {
                        user_content = with_correction(&prompt.user_content, &errors);
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                    NextAction::Fail => {
                        warn!("max attempts reached, returning no resume");
                        return Ok(None);
                    }
                }
            }
        }
    }

    Ok(None)
}

/// Parses the raw completion text and validates it against the resume shape.
/// A non-JSON body is reported as a root-level field error so it flows
/// through the same retry path as a shape mismatch.
fn parse_and_validate(text: &str) -> Result<Resume, Vec<FieldError>> {
    let value: Value = serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        vec![FieldError {
            path: "$".to_string(),
            message: format!("response was not valid JSON: {e}"),
        }]
    })?;
    validate_resume(&value)
}

/// Appends the validation errors to the original user content as an explicit
/// correction instruction. Always built from the base content, so corrections
/// from earlier attempts do not pile up.
fn with_correction(base: &str, errors: &[FieldError]) -> String {
    format!(
        "{base}\n\nThe previous response could not be parsed due to the following validation errors:\n{}\nPlease fix these issues and return valid JSON matching the required schema.",
        format_errors(errors)
    )
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_payload<T: serde::Serialize>(data: &T) -> Result<Value, AppError> {
    serde_json::to_value(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to serialize generator input: {e}")))
}
