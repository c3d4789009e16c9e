use crate::llm_client::LlmClient;

/// Shared application state injected into route handlers via Axum extractors.
/// All request work is stateless; the only shared piece is the LLM client
/// (and the connection pool inside its reqwest client).
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
}
