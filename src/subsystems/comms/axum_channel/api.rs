//! Axum handlers for `/api/*` routes.
//!
//! Each handler receives [`AxumState`] via [`axum::extract::State`] and
//! returns an axum [`Response`]. Errors use the `{error, message}` body.

use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AxumState;
use crate::subsystems::memory::{ContextMap, MemorySnapshot};
use crate::subsystems::prompts::{MAX_PROMPTS, PromptCategory};

/// Chat user id when the request names none.
const DEFAULT_USER: &str = "default";

const CHAT_TIMEOUT: Duration = Duration::from_secs(120);

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct MessageRequest {
    message: String,
    mode: Option<String>,
    user_id: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct HistoryQuery {
    limit: Option<usize>,
}

#[derive(Deserialize)]
pub(super) struct ClearQuery {
    user_id: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct PromptsQuery {
    count: Option<usize>,
    category: Option<String>,
    refresh: Option<bool>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn json_error(code: &str, msg: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(json!({ "error": code, "message": format!("{msg}") }))
}

fn unavailable(what: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        json_error("unavailable", format!("{what} is not configured")),
    )
        .into_response()
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /api/health
pub(super) async fn health(State(state): State<AxumState>) -> Response {
    let ctx = &state.ctx;
    let system = match &ctx.chat {
        Some(chat) => Some(chat.system_status().await),
        None => None,
    };
    let body = json!({
        "status": "ok",
        "app_name": ctx.config.app_name,
        "llm_provider": ctx.config.llm.provider,
        "chat_enabled": ctx.chat.is_some(),
        "prompts_enabled": ctx.prompts.is_some(),
        "system": system,
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// GET /api/capabilities
pub(super) async fn capabilities(State(state): State<AxumState>) -> Response {
    let chat = match &state.ctx.chat {
        Some(chat) => Some(chat.capabilities()),
        None => None,
    };
    let body = json!({
        "agents": state.ctx.orchestrator.available_capabilities(),
        "chat": chat,
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /api/message
pub(super) async fn message(State(state): State<AxumState>, Json(req): Json<MessageRequest>) -> Response {
    let text = req.message.trim();
    if text.is_empty() {
        return (StatusCode::BAD_REQUEST, json_error("bad_request", "message must not be empty")).into_response();
    }
    let ctx = &state.ctx;

    match req.mode.as_deref().unwrap_or("agents") {
        "agents" => {
            let outcome = {
                let mut memory = ctx.memory.lock().await;
                ctx.orchestrator.handle_multi_agent_workflow(&mut memory, text)
            };
            let body = json!({
                "mode": "agents",
                "reply": outcome.display_text(),
                "outcome": outcome,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        "chat" => {
            let Some(chat) = &ctx.chat else {
                return unavailable("LLM chat");
            };
            let user_id = req.user_id.as_deref().filter(|u| !u.is_empty()).unwrap_or(DEFAULT_USER);
            let reply = tokio::time::timeout(CHAT_TIMEOUT, chat.handle_message(text, user_id)).await;
            match reply {
                Ok(reply) => {
                    let body = json!({ "mode": "chat", "user_id": user_id, "reply": reply });
                    (StatusCode::OK, Json(body)).into_response()
                }
                Err(_) => {
                    warn!(channel_id = %state.channel_id, %user_id, "chat request timed out");
                    (StatusCode::GATEWAY_TIMEOUT, json_error("timeout", "LLM request timed out")).into_response()
                }
            }
        }
        other => (
            StatusCode::BAD_REQUEST,
            json_error("bad_request", format!("unknown mode '{other}' (expected agents or chat)")),
        )
            .into_response(),
    }
}

/// GET /api/summary
pub(super) async fn summary(State(state): State<AxumState>) -> Response {
    let memory = state.ctx.memory.lock().await;
    let summary = state.ctx.orchestrator.conversation_summary(&memory);
    (StatusCode::OK, Json(summary)).into_response()
}

/// GET /api/history?limit=
pub(super) async fn history(State(state): State<AxumState>, Query(q): Query<HistoryQuery>) -> Response {
    let limit = q.limit.unwrap_or(state.ctx.config.memory.context_window);
    let memory = state.ctx.memory.lock().await;
    let body = json!({
        "total": memory.conversation_history().len(),
        "history": memory.recent_conversation(limit),
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /api/preferences
pub(super) async fn preferences(State(state): State<AxumState>, Json(prefs): Json<ContextMap>) -> Response {
    let mut memory = state.ctx.memory.lock().await;
    state.ctx.orchestrator.update_user_preferences(&mut memory, &prefs);
    info!(channel_id = %state.channel_id, keys = prefs.len(), "preferences updated");
    (StatusCode::OK, Json(json!({ "user_preferences": memory.user_preferences() }))).into_response()
}

/// POST /api/context
pub(super) async fn context(State(state): State<AxumState>, Json(update): Json<ContextMap>) -> Response {
    let mut memory = state.ctx.memory.lock().await;
    memory.set_travel_context(&update);
    (StatusCode::OK, Json(json!({ "travel_context": memory.travel_context() }))).into_response()
}

/// GET /api/memory
pub(super) async fn export_memory(State(state): State<AxumState>) -> Response {
    let snapshot = state.ctx.memory.lock().await.export();
    (StatusCode::OK, Json(snapshot)).into_response()
}

/// POST /api/memory
pub(super) async fn import_memory(State(state): State<AxumState>, Json(snapshot): Json<MemorySnapshot>) -> Response {
    let mut memory = state.ctx.memory.lock().await;
    memory.import(snapshot);
    info!(
        channel_id = %state.channel_id,
        turns = memory.conversation_history().len(),
        "memory snapshot imported"
    );
    let body = json!({
        "status": "imported",
        "conversation_entries": memory.conversation_history().len(),
        "search_entries": memory.search_history().len(),
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /api/clear?user_id=
///
/// Clears the session memory, and the chat history of `user_id` when given.
pub(super) async fn clear(State(state): State<AxumState>, Query(q): Query<ClearQuery>) -> Response {
    state.ctx.orchestrator.clear_session(&mut *state.ctx.memory.lock().await);
    if let (Some(user_id), Some(chat)) = (q.user_id.as_deref(), &state.ctx.chat) {
        chat.clear_conversation(user_id).await;
    }
    (StatusCode::OK, Json(json!({ "status": "cleared" }))).into_response()
}

/// GET /api/prompts?count=&category=&refresh=
///
/// Without a `category`, stored preferences (when any) shape the suggestions.
/// `refresh=true` drops the cached list first.
pub(super) async fn prompts(State(state): State<AxumState>, Query(q): Query<PromptsQuery>) -> Response {
    let Some(fetcher) = &state.ctx.prompts else {
        return unavailable("prompt suggestions");
    };
    let count = q.count.unwrap_or(state.ctx.config.prompts.default_count).min(MAX_PROMPTS);
    let category = PromptCategory::parse(q.category.as_deref().unwrap_or_default());
    let preferences = match q.category {
        Some(_) => None,
        None => Some(state.ctx.memory.lock().await.user_preferences().clone()).filter(|p| !p.is_empty()),
    };

    let mut fetcher = fetcher.lock().await;
    if q.refresh.unwrap_or(false) {
        fetcher.refresh_cache();
    }
    let prompts = match &preferences {
        Some(prefs) => fetcher.contextual_prompts(prefs, count).await,
        None => fetcher.fetch_travel_prompts(count, category.as_str()).await,
    };
    let body = json!({
        "category": category.as_str(),
        "contextual": preferences.is_some(),
        "prompts": prompts,
    });
    (StatusCode::OK, Json(body)).into_response()
}
