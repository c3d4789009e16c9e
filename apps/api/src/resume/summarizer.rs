//! Data summarizer — optional preprocessing that condenses scraped profile
//! data before resume generation.

use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, CompletionBackend};
use crate::resume::prompts::build_summarizer_prompt;
use crate::resume::schema::{ScrapedData, SummarizedData};

/// Condenses `scraped` into a `SummarizedData` with a single completion call.
///
/// Returns `None` on any failure (call, parse, or shape mismatch); the caller
/// treats that as "summarization unavailable" and falls back to raw data.
/// Never retried.
pub async fn summarize(
    llm: &dyn CompletionBackend,
    scraped: &ScrapedData,
) -> Option<SummarizedData> {
    let payload = match serde_json::to_value(scraped) {
        Ok(value) => value,
        Err(e) => {
            warn!("failed to serialize scraped data for summarization: {e}");
            return None;
        }
    };
    let prompt = build_summarizer_prompt(&payload);

    info!("summarizing scraped data for resume generation");
    let text = match llm.complete(prompt.system, &prompt.user_content).await {
        Ok(text) => text,
        Err(e) => {
            warn!("summarizer completion call failed: {e}");
            return None;
        }
    };

    match serde_json::from_str::<SummarizedData>(strip_json_fences(&text)) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("summarizer returned unusable JSON: {e}");
            None
        }
    }
}
