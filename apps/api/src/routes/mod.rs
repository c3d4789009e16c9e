pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handle_chat;
use crate::resume::handlers::handle_generate_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/chat", post(handle_chat))
        .route("/api/v1/resume/generate", post(handle_generate_resume))
        .with_state(state)
}
