//! Axum-based HTTP channel serving the JSON API under `/api/`.
//!
//! `run()` drives the axum event loop; the shutdown [`CancellationToken`] is
//! wired to axum's graceful shutdown.
//!
//! ## URL layout
//!
//! ```text
//! GET  /api/health
//! GET  /api/capabilities
//! POST /api/message              {message, mode?: "agents"|"chat", user_id?}
//! GET  /api/summary
//! GET  /api/history?limit=
//! POST /api/preferences          JSON object merged into preferences
//! POST /api/context              JSON object merged into travel context
//! GET  /api/memory               snapshot export
//! POST /api/memory               snapshot import
//! POST /api/clear?user_id=
//! GET  /api/prompts?count=&category=&refresh=
//! ```

mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{Channel, ChannelFuture};
use crate::context::AppContext;
use crate::error::AppError;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler. Cheap to clone.
#[derive(Clone)]
pub(crate) struct AxumState {
    /// Channel identifier used in log fields.
    pub channel_id: Arc<str>,
    pub ctx: Arc<AppContext>,
}

// ── AxumChannel ───────────────────────────────────────────────────────────────

pub struct AxumChannel {
    channel_id: String,
    bind_addr: String,
}

impl AxumChannel {
    pub fn new(channel_id: impl Into<String>, bind_addr: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            bind_addr: bind_addr.into(),
        }
    }
}

impl Channel for AxumChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, ctx: Arc<AppContext>, shutdown: CancellationToken) -> ChannelFuture {
        Box::pin(run_axum(self.channel_id, self.bind_addr, ctx, shutdown))
    }
}

// ── Server loop ───────────────────────────────────────────────────────────────

async fn run_axum(
    channel_id: String,
    bind_addr: String,
    ctx: Arc<AppContext>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let router = build_router_for(&channel_id, ctx);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Comms(format!("axum bind failed on {bind_addr}: {e}")))?;

    info!(%channel_id, %bind_addr, "axum channel listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Comms(format!("axum server error: {e}")))?;

    info!(%channel_id, "axum channel shut down");
    Ok(())
}

// ── Router ────────────────────────────────────────────────────────────────────

/// The API router over `ctx`. Used by the channel and by in-process tests.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    build_router_for("http", ctx)
}

fn build_router_for(channel_id: &str, ctx: Arc<AppContext>) -> Router {
    let state = AxumState { channel_id: Arc::from(channel_id), ctx };
    Router::new()
        .route("/api/health",       get(api::health))
        .route("/api/capabilities", get(api::capabilities))
        .route("/api/message",      post(api::message))
        .route("/api/summary",      get(api::summary))
        .route("/api/history",      get(api::history))
        .route("/api/preferences",  post(api::preferences))
        .route("/api/context",      post(api::context))
        .route("/api/memory",       get(api::export_memory).post(api::import_memory))
        .route("/api/clear",        post(api::clear))
        .route("/api/prompts",      get(api::prompts))
        .with_state(state)
}
