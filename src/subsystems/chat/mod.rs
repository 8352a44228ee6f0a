//! Free-form travel chat backed by an LLM provider.
//!
//! Requests are classified with the same keyword scorer as the orchestrator,
//! which only decides which system prompt frames the conversation. Each user
//! keeps a separate history; the last [`HISTORY_WINDOW`] turns are sent with
//! every call.
//!
//! Histories sit behind their own lock, taken only to read or append turns.
//! It is never held across a provider call, so status queries and other
//! users' chats do not wait on network I/O.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::clock::SharedClock;
use crate::llm::{ChatMessage, CompletionOptions, LlmProvider};
use crate::subsystems::memory::Role;
use crate::subsystems::orchestrator::{Capabilities, ERROR_PREFIX};
use crate::subsystems::routing::{AgentKind, KeywordClassifier};

/// Turns of history sent to the provider per call.
pub const HISTORY_WINDOW: usize = 10;

/// Agent name stored on apology turns.
pub const SYSTEM_AGENT: &str = "System";

const INFO_SYSTEM_PROMPT: &str = "You are an expert travel information agent specialized in providing comprehensive destination details, weather information, and cultural insights.

Your capabilities include:
- Providing detailed destination information and cultural context
- Fetching current weather conditions and forecasts
- Finding attractions, activities, and points of interest
- Offering practical travel tips and local customs advice
- Providing currency and payment information

When responding:
1. Be informative and detailed while remaining concise
2. Provide practical, actionable advice
3. Focus on safety and cultural sensitivity
4. Format responses clearly with proper structure

Always provide helpful, accurate, and up-to-date travel information.";

const TRAVEL_SYSTEM_PROMPT: &str = "You are an expert travel planning agent specialized in creating detailed itineraries, suggesting accommodations, and providing comprehensive travel plans.

Your capabilities include:
- Creating detailed day-by-day itineraries
- Suggesting accommodations based on preferences and budget
- Estimating travel budgets and costs
- Generating personalized packing lists
- Planning transportation and logistics

When responding:
1. Create structured, easy-to-follow itineraries
2. Consider budget constraints and preferences
3. Provide realistic time estimates and logistics
4. Include practical tips and recommendations

Always create practical, well-organized travel plans.";

pub fn system_prompt(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::Info => INFO_SYSTEM_PROMPT,
        AgentKind::Travel => TRAVEL_SYSTEM_PROMPT,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    pub agents_registered: usize,
    pub tools_available: usize,
    pub memory_enabled: bool,
    pub api_configured: bool,
    pub provider: &'static str,
    pub total_conversations: usize,
    pub total_messages: usize,
}

pub struct TravelChat {
    provider: LlmProvider,
    options: CompletionOptions,
    classifier: KeywordClassifier,
    clock: SharedClock,
    api_configured: bool,
    histories: Mutex<HashMap<String, Vec<ChatTurn>>>,
}

impl TravelChat {
    pub fn new(provider: LlmProvider, options: CompletionOptions, clock: SharedClock, api_configured: bool) -> Self {
        Self {
            provider,
            options,
            classifier: KeywordClassifier::new(),
            clock,
            api_configured,
            histories: Mutex::new(HashMap::new()),
        }
    }

    async fn push(&self, user_id: &str, role: Role, content: String, agent: Option<&str>) {
        let turn = ChatTurn {
            role,
            content,
            timestamp: self.clock.now(),
            agent: agent.map(str::to_string),
        };
        self.histories.lock().await.entry(user_id.to_string()).or_default().push(turn);
    }

    /// Answer `message` for `user_id`. Provider failures come back as the
    /// apology text and are stored under the `System` agent.
    pub async fn handle_message(&self, message: &str, user_id: &str) -> String {
        let kind = self.classifier.classify(message);
        let mut messages = vec![ChatMessage::system(system_prompt(kind))];
        {
            let mut histories = self.histories.lock().await;
            let turns = histories.entry(user_id.to_string()).or_default();
            turns.push(ChatTurn {
                role: Role::User,
                content: message.to_string(),
                timestamp: self.clock.now(),
                agent: None,
            });
            messages.extend(recent(turns, HISTORY_WINDOW).iter().map(|turn| match turn.role {
                Role::User => ChatMessage::user(turn.content.clone()),
                Role::Assistant => ChatMessage::assistant(turn.content.clone()),
            }));
        }

        info!(%user_id, agent = kind.name(), turns = messages.len() - 1, "chat: sending conversation");
        match self.provider.complete(&messages, self.options).await {
            Ok(reply) => {
                self.push(user_id, Role::Assistant, reply.clone(), Some(kind.name())).await;
                reply
            }
            Err(e) => {
                warn!(%user_id, error = %e, "chat: provider failed");
                let apology = format!("{ERROR_PREFIX}: {e}");
                self.push(user_id, Role::Assistant, apology.clone(), Some(SYSTEM_AGENT)).await;
                apology
            }
        }
    }

    /// The last `limit` turns for `user_id`; empty for unknown users.
    pub async fn conversation_history(&self, user_id: &str, limit: usize) -> Vec<ChatTurn> {
        match self.histories.lock().await.get(user_id) {
            Some(turns) => recent(turns, limit).to_vec(),
            None => Vec::new(),
        }
    }

    pub async fn clear_conversation(&self, user_id: &str) {
        if let Some(turns) = self.histories.lock().await.get_mut(user_id) {
            turns.clear();
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::new();
        caps.insert(
            AgentKind::Info.name(),
            &[
                "Get destination information and cultural context",
                "Check weather conditions and forecasts",
                "Find attractions, activities, and points of interest",
                "Provide travel tips and local customs advice",
                "Currency and payment information",
            ],
        );
        caps.insert(
            AgentKind::Travel.name(),
            &[
                "Create detailed day-by-day itineraries",
                "Suggest accommodations based on preferences",
                "Estimate travel budgets and costs",
                "Generate personalized packing lists",
                "Plan transportation and logistics",
            ],
        );
        caps
    }

    pub async fn system_status(&self) -> SystemStatus {
        let histories = self.histories.lock().await;
        SystemStatus {
            agents_registered: 2,
            tools_available: 9,
            memory_enabled: true,
            api_configured: self.api_configured,
            provider: self.provider.name(),
            total_conversations: histories.len(),
            total_messages: histories.values().map(Vec::len).sum(),
        }
    }
}

fn recent(turns: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    &turns[turns.len().saturating_sub(limit)..]
}
