use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    assistant::{self, ChatMessage},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatInput {
    /// Conversation so far, oldest first. Roles are `user` and `assistant`;
    /// the system prompt is injected server-side.
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub message: String,
}

/// POST /api/assistant/chat - forwards the transcript to the completion
/// service with the staff tools declared and runs any tool calls against the
/// database before replying.
#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    request_body = ChatInput,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty transcript or assistant not configured"),
        (status = 502, description = "Completion service failure")
    ),
    tag = "assistant"
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ChatInput>,
) -> AppResult<Json<ChatResponse>> {
    let client = state
        .assistant
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("The assistant is not configured".to_string()))?;

    if input.messages.is_empty() {
        return Err(AppError::BadRequest(
            "At least one message is required".to_string(),
        ));
    }

    let message = assistant::run_chat(client, &state.db, input.messages).await?;
    Ok(Json(ChatResponse { message }))
}
