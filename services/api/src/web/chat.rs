//! services/api/src/web/chat.rs
//!
//! The companion-chat endpoint. No fallback text exists for a conversation,
//! so any upstream failure surfaces as an explicit error.

use crate::web::state::AppState;
use crate::web::surface_error;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::{ChatMessage, UserContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

/// The request payload for one chat turn.
#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<ChatMessage>,
    #[schema(value_type = Option<Object>)]
    pub user_context: Option<UserContext>,
}

/// The assistant's reply.
#[derive(Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// Chat with the companion assistant.
#[utoipa::path(
    post,
    path = "/api/ai/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty message list"),
        (status = 502, description = "Upstream chat model failed"),
        (status = 503, description = "Chat capability not configured")
    )
)]
pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if request.messages.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "messages must contain at least one entry".to_string(),
        ));
    }

    let chat = app_state.chat.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "The chat service is not configured".to_string(),
        )
    })?;

    match chat
        .chat(&request.messages, request.user_context.as_ref())
        .await
    {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e) => {
            error!("Companion chat failed: {}", e);
            Err(surface_error("chat", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;
    use seniorsync_core::domain::Role;

    #[tokio::test]
    async fn empty_message_list_is_rejected_before_any_upstream_call() {
        let state = Arc::new(unconfigured_state());
        let result = chat_handler(
            State(state),
            Json(ChatRequest {
                messages: vec![],
                user_context: None,
            }),
        )
        .await;

        let err = result.err().expect("empty messages should be rejected");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_credential_surfaces_as_service_unavailable() {
        let state = Arc::new(unconfigured_state());
        let result = chat_handler(
            State(state),
            Json(ChatRequest {
                messages: vec![ChatMessage {
                    role: Role::User,
                    content: "Hello".to_string(),
                }],
                user_context: None,
            }),
        )
        .await;

        let err = result.err().expect("unconfigured chat should error, not fall back");
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
    }
}
