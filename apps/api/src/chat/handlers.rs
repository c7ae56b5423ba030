use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::conversation::{
    format_history, greeting_message, summarize_conversation, validate_message, IncomingTurn,
};
use crate::chat::prompts::build_system_prompt;
use crate::chat::scope::classify;
use crate::errors::AppError;
use crate::resume::context::format_resume_context;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "conversationHistory")]
    pub conversation_history: Vec<IncomingTurn>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "inScope")]
    pub in_scope: bool,
}

/// POST /chat
///
/// Validates the user message, rebuilds the grounding prompt from the
/// current résumé, replays the sanitized history to the model, and labels
/// the reply in-scope or out-of-scope.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate_message(&req.message)?;

    let history = format_history(&req.conversation_history);
    let summary = summarize_conversation(&history);
    debug!(
        "chat request: {} user / {} assistant turns of prior history",
        summary.user_messages, summary.assistant_messages
    );

    let resume = state.resume.get()?;
    let context = format_resume_context(&resume);
    let system_prompt = build_system_prompt(&context);

    let reply = state.llm.send(&system_prompt, &history, &req.message).await?;

    let scope = classify(&reply);
    if !scope.in_scope {
        debug!("reply classified as out-of-scope");
    }

    Ok(Json(ChatResponse {
        success: true,
        message: scope.reply_text,
        in_scope: scope.in_scope,
    }))
}

#[derive(Deserialize)]
pub struct GreetingQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// GET /chat/greeting
/// Returns the widget's opening message, personalized when `?name=` is given.
pub async fn handle_greeting(Query(params): Query<GreetingQuery>) -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: greeting_message(params.name.as_deref()),
    })
}

/// OPTIONS /chat
/// Preflights are answered by the CORS layer; a bare OPTIONS still gets 200.
pub async fn handle_chat_options() -> StatusCode {
    StatusCode::OK
}
