//! PTY (console) channel: reads lines from stdin, runs each through the
//! multi-agent workflow and prints the reply to stdout.
//!
//! Lines starting with `/` are console commands (see [`HELP`]). Runs until
//! the shutdown token is cancelled (Ctrl-C) or stdin is closed.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{Channel, ChannelFuture};
use crate::context::AppContext;
use crate::error::AppError;
use crate::subsystems::memory::{ContextMap, ContextValue};

/// User id for chat turns typed at the console.
pub const CONSOLE_USER: &str = "console";

/// Turns shown by `/history`.
const HISTORY_TURNS: usize = 10;

pub const HELP: &str = "Commands:
  /chat <message>          ask the LLM travel chat
  /prompts [n] [refresh]   suggest example prompts (refresh drops the cache)
  /history                 show recent conversation
  /prefs key=value ...     store preferences (comma-separated values become lists)
  /context                 show stored preferences and travel context
  /export                  print the memory snapshot as JSON
  /clear                   clear the session
  /help                    show this help
Anything else is sent to the travel agents.";

// ── PtyChannel ───────────────────────────────────────────────────────────────

pub struct PtyChannel {
    channel_id: String,
}

impl PtyChannel {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self { channel_id: channel_id.into() }
    }
}

impl Channel for PtyChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, ctx: Arc<AppContext>, shutdown: CancellationToken) -> ChannelFuture {
        Box::pin(run_pty(self.channel_id, ctx, shutdown))
    }
}

// ── run_pty ──────────────────────────────────────────────────────────────────

async fn run_pty(channel_id: String, ctx: Arc<AppContext>, shutdown: CancellationToken) -> Result<(), AppError> {
    info!(%channel_id, "pty channel started");
    println!("─────────────────────────────────────────");
    println!(" {} travel assistant  (Ctrl-C to quit)", ctx.config.app_name);
    println!(" Type /help for commands");
    println!("─────────────────────────────────────────");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        print!("> ");
        use std::io::Write as _;
        let _ = std::io::stdout().flush();

        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                println!();
                info!(%channel_id, "pty channel shutting down");
                break;
            }

            line = lines.next_line() => {
                match line {
                    Err(e) => {
                        warn!("pty read error: {e}");
                        break;
                    }
                    Ok(None) => {
                        info!("pty stdin closed");
                        break;
                    }
                    Ok(Some(input)) => {
                        let input = input.trim();
                        if input.is_empty() { continue; }
                        debug!(%input, "pty received line");
                        println!("{}\n", handle_line(&ctx, input).await);
                    }
                }
            }
        }
    }

    Ok(())
}

// ── Line handling ────────────────────────────────────────────────────────────

/// Handle one console line and return the text to print.
pub async fn handle_line(ctx: &AppContext, input: &str) -> String {
    let Some(command) = input.strip_prefix('/') else {
        let mut memory = ctx.memory.lock().await;
        return ctx.orchestrator.handle_multi_agent_workflow(&mut memory, input).display_text();
    };

    let (name, args) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    let args = args.trim();

    match name {
        "help" => HELP.to_string(),
        "chat" => chat(ctx, args).await,
        "prompts" => prompts(ctx, args).await,
        "history" => {
            let memory = ctx.memory.lock().await;
            let turns = memory.recent_conversation(HISTORY_TURNS);
            if turns.is_empty() {
                return "No conversation yet.".to_string();
            }
            turns
                .iter()
                .map(|t| match &t.agent {
                    Some(agent) => format!("[{}] {} ({agent}): {}", t.timestamp.format("%H:%M"), t.role, t.message),
                    None => format!("[{}] {}: {}", t.timestamp.format("%H:%M"), t.role, t.message),
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        "prefs" => {
            let prefs = parse_preferences(args);
            if prefs.is_empty() {
                return "Usage: /prefs key=value [key=value ...]".to_string();
            }
            let mut memory = ctx.memory.lock().await;
            ctx.orchestrator.update_user_preferences(&mut memory, &prefs);
            memory.user_preferences_context()
        }
        "context" => {
            let memory = ctx.memory.lock().await;
            format!("{}\n\n{}", memory.user_preferences_context(), memory.travel_context_summary())
        }
        "export" => match ctx.memory.lock().await.export_json() {
            Ok(json) => json,
            Err(e) => format!("Export failed: {e}"),
        },
        "clear" => {
            ctx.orchestrator.clear_session(&mut *ctx.memory.lock().await);
            #[cfg(feature = "subsystem-llm")]
            {
                if let Some(chat) = &ctx.chat {
                    chat.clear_conversation(CONSOLE_USER).await;
                }
            }
            "Session cleared.".to_string()
        }
        other => format!("Unknown command: /{other}. Type /help for the list."),
    }
}

#[cfg(feature = "subsystem-llm")]
async fn chat(ctx: &AppContext, message: &str) -> String {
    if message.is_empty() {
        return "Usage: /chat <message>".to_string();
    }
    match &ctx.chat {
        Some(chat) => chat.handle_message(message, CONSOLE_USER).await,
        None => "LLM chat is not configured (set LLM_API_KEY).".to_string(),
    }
}

#[cfg(not(feature = "subsystem-llm"))]
async fn chat(_ctx: &AppContext, _message: &str) -> String {
    "LLM chat is not available in this build.".to_string()
}

/// `/prompts [n] [refresh]`. Stored preferences, when any, shape the list.
#[cfg(feature = "subsystem-llm")]
async fn prompts(ctx: &AppContext, args: &str) -> String {
    use crate::subsystems::prompts::{MAX_PROMPTS, PromptCategory};

    let Some(fetcher) = &ctx.prompts else {
        return "Prompt suggestions are not configured.".to_string();
    };
    let mut count = ctx.config.prompts.default_count;
    let mut refresh = false;
    for arg in args.split_whitespace() {
        match arg {
            "refresh" => refresh = true,
            n => count = n.parse().unwrap_or(count),
        }
    }
    let count = count.min(MAX_PROMPTS);
    let preferences = ctx.memory.lock().await.user_preferences().clone();

    let mut fetcher = fetcher.lock().await;
    if refresh {
        fetcher.refresh_cache();
    }
    let prompts = if preferences.is_empty() {
        fetcher.fetch_travel_prompts(count, PromptCategory::General.as_str()).await
    } else {
        fetcher.contextual_prompts(&preferences, count).await
    };
    if prompts.is_empty() {
        return "No prompt suggestions available.".to_string();
    }
    prompts
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {p}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(not(feature = "subsystem-llm"))]
async fn prompts(_ctx: &AppContext, _args: &str) -> String {
    "Prompt suggestions are not available in this build.".to_string()
}

/// Parse `key=value` pairs. Integers and booleans keep their type, values
/// with commas become lists; tokens without `=` are ignored.
pub fn parse_preferences(args: &str) -> ContextMap {
    let mut prefs = ContextMap::new();
    for (key, value) in args.split_whitespace().filter_map(|pair| pair.split_once('=')) {
        if key.is_empty() || value.is_empty() {
            continue;
        }
        let value = if let Ok(n) = value.parse::<i64>() {
            ContextValue::Int(n)
        } else if let Ok(b) = value.parse::<bool>() {
            ContextValue::Bool(b)
        } else if value.contains(',') {
            ContextValue::List(
                value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect(),
            )
        } else {
            ContextValue::Str(value.to_string())
        };
        prefs.set(key, value);
    }
    prefs
}
