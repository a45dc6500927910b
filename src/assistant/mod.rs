//! Chat assistant: proxies a transcript to the completion service with the
//! three staff tools declared, executing tool calls against the database
//! until the model produces a plain reply.

mod openai;
mod tools;

use sqlx::PgPool;

pub use openai::{ChatClient, ChatMessage};

use crate::{AppError, AppResult};

const SYSTEM_PROMPT: &str = "You are an assistant for a trade-show staffing agency. \
You can look up and update staff records using the provided tools. \
Always find a staff member with searchStaff or getStaffMember before updating them.";

/// A tool-call loop can run away; five rounds is more than any real staff
/// edit needs.
const MAX_TOOL_ROUNDS: usize = 5;

pub async fn run_chat(
    client: &ChatClient,
    db: &PgPool,
    transcript: Vec<ChatMessage>,
) -> AppResult<String> {
    let tool_defs = tools::tool_definitions();

    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));
    messages.extend(transcript);

    for _ in 0..MAX_TOOL_ROUNDS {
        let reply = client.complete(&messages, &tool_defs).await?;

        let tool_calls = reply.tool_calls.clone().unwrap_or_default();
        if tool_calls.is_empty() {
            return reply
                .content
                .ok_or_else(|| AppError::Upstream("Completion had no content".to_string()));
        }

        messages.push(reply);
        for call in &tool_calls {
            tracing::debug!(tool = %call.function.name, "Executing assistant tool call");
            let result = tools::run_tool(db, &call.function.name, &call.function.arguments).await;
            messages.push(ChatMessage::tool_result(&call.id, result));
        }
    }

    Err(AppError::Upstream(
        "Assistant exceeded the tool-call limit without replying".to_string(),
    ))
}
