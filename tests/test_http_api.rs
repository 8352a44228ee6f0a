//! In-process tests for the JSON API, driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use tripmate::clock::ManualClock;
use tripmate::config::Config;
use tripmate::context::AppContext;
use tripmate::subsystems::comms::axum_channel::build_router;

fn app_with(config: Config) -> (Router, Arc<AppContext>) {
    let clock = Arc::new(ManualClock::at_date(2025, 6, 1).unwrap());
    let ctx = Arc::new(AppContext::with_clock(config, clock).unwrap());
    (build_router(ctx.clone()), ctx)
}

fn app() -> (Router, Arc<AppContext>) {
    app_with(Config::test_default())
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_components() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["llm_provider"], "dummy");
    assert_eq!(body["chat_enabled"], true);
    assert_eq!(body["system"]["tools_available"], 9);
}

#[tokio::test]
async fn capabilities_list_agents() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::GET, "/api/capabilities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["agents"]["InfoAgent"].as_array().unwrap().len() >= 5);
    assert!(body["agents"]["TravelAgent"].is_array());
    assert!(body["chat"]["TravelAgent"].is_array());
}

#[tokio::test]
async fn agent_message_returns_record() {
    let (router, ctx) = app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/message",
        Some(json!({ "message": "What's the weather in Lisbon?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "agents");
    assert_eq!(body["outcome"]["type"], "single_agent_response");
    assert_eq!(body["outcome"]["agent_used"], "info_agent");
    assert!(body["reply"].as_str().unwrap().contains("Weather information for Lisbon"));
    assert_eq!(ctx.memory.lock().await.conversation_history().len(), 3);
}

#[tokio::test]
async fn complete_request_is_multi_agent() {
    let (router, _) = app();
    let (_, body) = send(
        &router,
        Method::POST,
        "/api/message",
        Some(json!({ "message": "Everything I need for Vienna" })),
    )
    .await;
    assert_eq!(body["outcome"]["type"], "multi_agent_response");
    assert!(body["reply"].as_str().unwrap().contains("\n\n---\n\n"));
}

#[tokio::test]
async fn chat_mode_uses_provider_per_user() {
    let (router, ctx) = app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/message",
        Some(json!({ "message": "hello", "mode": "chat", "user_id": "ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "[echo] hello");
    assert_eq!(body["user_id"], "ana");
    let chat = ctx.chat.as_ref().unwrap();
    assert_eq!(chat.conversation_history("ana", 10).await.len(), 2);
    // Chat turns never touch the agent memory.
    assert!(ctx.memory.lock().await.conversation_history().is_empty());
}

#[tokio::test]
async fn bad_messages_are_rejected() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::POST, "/api/message", Some(json!({ "message": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/message",
        Some(json!({ "message": "hi", "mode": "telepathy" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_without_key_is_unavailable() {
    let mut config = Config::test_default();
    config.llm.provider = "openai".into();
    let (router, _) = app_with(config);
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/message",
        Some(json!({ "message": "hello", "mode": "chat" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "unavailable");

    let (status, _) = send(&router, Method::GET, "/api/prompts", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn preferences_and_context_feed_the_summary() {
    let (router, _) = app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/preferences",
        Some(json!({ "budget_level": "luxury", "interests": ["food", "art"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_preferences"]["budget_level"], "luxury");

    let (_, body) = send(&router, Method::POST, "/api/context", Some(json!({ "destination": "Seoul" }))).await;
    assert_eq!(body["travel_context"]["destination"], "Seoul");

    send(&router, Method::POST, "/api/message", Some(json!({ "message": "Suggest a hotel" }))).await;

    let (_, summary) = send(&router, Method::GET, "/api/summary", None).await;
    assert_eq!(summary["user_preferences"]["interests"], json!(["food", "art"]));
    assert_eq!(summary["travel_context"]["destination"], "Seoul");
    assert_eq!(summary["total_interactions"], 3);

    let (_, history) = send(&router, Method::GET, "/api/history?limit=1", None).await;
    assert_eq!(history["total"], 3);
    assert_eq!(history["history"].as_array().unwrap().len(), 1);
    assert_eq!(history["history"][0]["role"], "assistant");
}

#[tokio::test]
async fn memory_export_import_and_clear() {
    let (router, _) = app();
    send(&router, Method::POST, "/api/message", Some(json!({ "message": "Tips for Athens" }))).await;

    let (status, snapshot) = send(&router, Method::GET, "/api/memory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["conversation_history"].as_array().unwrap().len(), 3);
    assert_eq!(snapshot["search_history"].as_array().unwrap().len(), 1);

    let (status, body) = send(&router, Method::POST, "/api/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cleared");
    let (_, empty) = send(&router, Method::GET, "/api/memory", None).await;
    assert!(empty["conversation_history"].as_array().unwrap().is_empty());

    let (status, body) = send(&router, Method::POST, "/api/memory", Some(snapshot.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation_entries"], 3);
    let (_, restored) = send(&router, Method::GET, "/api/memory", None).await;
    assert_eq!(restored, snapshot);

    // Missing keys import as empty stores.
    let (status, body) = send(&router, Method::POST, "/api/memory", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversation_entries"], 0);
}

#[tokio::test]
async fn prompts_respect_count_and_category() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::GET, "/api/prompts?count=3&category=BUDGET", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "budget");
    let prompts = body["prompts"].as_array().unwrap();
    assert!(!prompts.is_empty() && prompts.len() <= 3);

    let (_, body) = send(&router, Method::GET, "/api/prompts?category=unheard-of", None).await;
    assert_eq!(body["category"], "general");
}

#[tokio::test]
async fn prompts_use_preferences_and_cap_count() {
    let (router, _) = app();
    let (_, body) = send(&router, Method::GET, "/api/prompts?count=500", None).await;
    assert_eq!(body["contextual"], false);
    assert!(body["prompts"][0].as_str().unwrap().contains("Generate 50 diverse"));

    send(&router, Method::POST, "/api/preferences", Some(json!({ "travel_style": "slow" }))).await;
    let (status, body) = send(&router, Method::GET, "/api/prompts?count=2&refresh=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contextual"], true);
    // Contextual replies that are not a JSON list fall back to fresh general prompts.
    assert!(body["prompts"][0].as_str().unwrap().contains("Generate 2 diverse"));

    // An explicit category bypasses preferences.
    let (_, body) = send(&router, Method::GET, "/api/prompts?category=budget", None).await;
    assert_eq!(body["contextual"], false);
}
