//! Chat passthrough — relays a single user message to the provider and
//! returns the reply verbatim. Stateless: no conversation history.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::ChatReply;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Model override; defaults to the configured model when omitted.
    #[serde(default)]
    pub model: Option<String>,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let model = request.model.as_deref().unwrap_or(state.llm.model());
    let reply = state.llm.fetch_chat_response(&request.message, model).await?;

    Ok(Json(reply))
}
