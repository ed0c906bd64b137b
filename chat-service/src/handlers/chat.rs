//! The chat function.
//!
//! Every POST answers 200. Failures are reported to the user inside
//! `response`, with `hasTools: false`.

use crate::dtos::{ChatRequest, ChatResponse};
use crate::services::metrics::{self, outcome};
use crate::services::{PromptMessage, ProviderError, ToolHints};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, response::Response, Json};
use service_core::middleware::CorsPolicy;
use std::time::Instant;

pub const CHAT_CORS: CorsPolicy = CorsPolicy::new("GET, POST, OPTIONS", "Content-Type, X-User-Id");

pub const SYSTEM_PROMPT: &str = "Ты MonkyAI - умный ассистент с математическими способностями.\n\
Если видишь математическое выражение - вычисли его точно.\n\
Если нужна актуальная информация - скажи что используешь веб-поиск.\n\
Отвечай кратко и по делу.";

pub const MISSING_KEY_MESSAGE: &str =
    "Пожалуйста, добавьте OPENAI_API_KEY в настройках проекта для работы AI.";

const UNKNOWN_API_ERROR: &str = "Неизвестная ошибка";

pub async fn chat_preflight() -> Response {
    CHAT_CORS.preflight()
}

#[tracing::instrument(name = "chat", skip_all)]
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    Json(answer(&state, &body).await)
}

async fn answer(state: &AppState, body: &[u8]) -> ChatResponse {
    let request = match ChatRequest::from_body(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed chat request body");
            metrics::record_request(outcome::BAD_REQUEST);
            return failure(&e);
        }
    };

    let Some(provider) = state.provider.as_ref() else {
        tracing::warn!("Chat request without a configured API key");
        metrics::record_request(outcome::NOT_CONFIGURED);
        return ChatResponse::plain(MISSING_KEY_MESSAGE);
    };

    let user_message = request.last_user_message();
    let hints = ToolHints::detect(user_message);

    tracing::info!(
        message_count = request.message_count(),
        message_len = user_message.chars().count(),
        math = hints.math,
        search = hints.search,
        provider = provider.name(),
        "Forwarding chat message"
    );

    let messages = [
        PromptMessage::system(SYSTEM_PROMPT),
        PromptMessage::user(user_message),
    ];
    let params = state.generation_params();
    let started = Instant::now();

    match provider.complete(&messages, &params).await {
        Ok(reply) => {
            metrics::record_completion(
                provider.name(),
                started.elapsed(),
                reply.input_tokens,
                reply.output_tokens,
            );
            metrics::record_tool_hints(hints.math, hints.search);
            metrics::record_request(outcome::ANSWERED);

            tracing::info!(
                input_tokens = reply.input_tokens,
                output_tokens = reply.output_tokens,
                finish_reason = reply.finish_reason.as_str(),
                "Chat completion received"
            );

            ChatResponse {
                response: hints.annotate(&reply.text),
                has_tools: hints.has_tools(),
            }
        }
        Err(ProviderError::Api { status, message }) => {
            tracing::warn!(status, message = ?message, "Chat completion API rejected the request");
            metrics::record_request(outcome::UPSTREAM_ERROR);
            ChatResponse::plain(format!(
                "Ошибка API: {}",
                message.as_deref().unwrap_or(UNKNOWN_API_ERROR)
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat completion failed");
            metrics::record_request(outcome::FAILED);
            failure(&e)
        }
    }
}

fn failure(err: &dyn std::fmt::Display) -> ChatResponse {
    ChatResponse::plain(format!("Произошла ошибка: {}", err))
}
