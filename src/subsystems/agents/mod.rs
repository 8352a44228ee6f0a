//! Agents: turn a classified request into a provider call and a readable reply.
//!
//! Each agent picks one provider from intent keywords in the request, fills
//! its inputs from the extracted context (with fixed defaults), logs the raw
//! result to the memory search log and renders a multi-section text reply.
//! Provider failures ([`ToolError`]) are rendered inline; only rendering and
//! payload serialisation failures surface as [`AgentError`].

pub mod info;
pub mod travel;

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::SharedClock;
use crate::subsystems::memory::{ContextMap, Role, TravelMemory};
use crate::subsystems::routing::AgentKind;
use crate::subsystems::tools::ToolError;

pub use info::InfoAgent;
pub use travel::TravelAgent;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to render reply: {0}")]
    Render(#[from] fmt::Error),

    #[error("failed to serialise provider payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Both agents, dispatched by [`AgentKind`].
pub struct Agents {
    info: InfoAgent,
    travel: TravelAgent,
}

impl Agents {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            info: InfoAgent::new(clock.clone()),
            travel: TravelAgent::new(clock),
        }
    }

    pub fn process_request(
        &self,
        kind: AgentKind,
        memory: &mut TravelMemory,
        request: &str,
        context: &ContextMap,
    ) -> Result<String, AgentError> {
        match kind {
            AgentKind::Info => self.info.process_request(memory, request, context),
            AgentKind::Travel => self.travel.process_request(memory, request, context),
        }
    }
}

/// Shared turn bookkeeping: log the user turn, run `body`, log the reply.
///
/// On failure the apology text is still logged as the assistant turn before
/// the error is handed back.
pub(crate) fn run_turn(
    memory: &mut TravelMemory,
    agent: &str,
    request: &str,
    apology: &str,
    body: impl FnOnce(&mut TravelMemory) -> Result<String, AgentError>,
) -> Result<String, AgentError> {
    memory.add_conversation(Role::User, request, Some(agent));
    match body(memory) {
        Ok(response) => {
            memory.add_conversation(Role::Assistant, response.clone(), Some(agent));
            Ok(response)
        }
        Err(e) => {
            warn!(%agent, error = %e, "agent: request failed");
            memory.add_conversation(Role::Assistant, format!("{apology}: {e}"), Some(agent));
            Err(e)
        }
    }
}

/// Store a provider result in the search log: the payload on success,
/// `{"error": ...}` on failure.
pub(crate) fn log_result<T: Serialize>(
    memory: &mut TravelMemory,
    query: String,
    result: &Result<T, ToolError>,
    agent: &str,
) -> Result<(), AgentError> {
    let value = match result {
        Ok(payload) => serde_json::to_value(payload)?,
        Err(e) => e.to_json(),
    };
    debug!(%query, ok = result.is_ok(), "agent: provider result logged");
    memory.add_search_result(query, value, agent);
    Ok(())
}

/// Context field readers with the agents' fallback values.
pub(crate) struct Fields<'a>(pub &'a ContextMap);

impl Fields<'_> {
    pub fn text(&self, key: &str, default: &str) -> String {
        self.0.get_str(key).unwrap_or(default).to_string()
    }

    pub fn opt_text(&self, key: &str) -> Option<String> {
        self.0.get_str(key).map(str::to_string)
    }

    /// Non-negative integer; negatives and non-numbers take the default.
    pub fn count(&self, key: &str, default: u32) -> u32 {
        self.0
            .get_int(key)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default)
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.0.get_list(key).unwrap_or_default()
    }
}
