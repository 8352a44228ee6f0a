//! Orchestrator: routes a request to one agent, or runs both for a
//! complete-trip request, and packages the outcome as a record.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::config::{MemoryConfig, OrchestratorConfig};
use crate::error::AppError;
use crate::subsystems::agents::{AgentError, Agents};
use crate::subsystems::memory::{ContextMap, ConversationEntry, Role, TravelMemory};
use crate::subsystems::routing::{AgentKind, ContextExtractor, KeywordClassifier};

/// Words that switch a request to the two-agent workflow.
pub const MULTI_AGENT_TRIGGERS: &[&str] = &["complete", "full", "everything", "comprehensive"];

pub const ERROR_PREFIX: &str = "I encountered an error while processing your request";

/// Outcome of one routed request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    pub request_id: Uuid,
    pub user_request: String,
    /// `info_agent`, `travel_agent`, or `error`.
    pub agent_used: String,
    pub extracted_context: ContextMap,
    pub response: String,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RequestRecord {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum WorkflowOutcome {
    #[serde(rename = "single_agent_response")]
    Single(RequestRecord),
    #[serde(rename = "multi_agent_response")]
    Combined {
        destination_info: String,
        travel_plan: String,
        context: ContextMap,
        timestamp: DateTime<Local>,
    },
}

impl WorkflowOutcome {
    /// The text to show the user.
    pub fn display_text(&self) -> String {
        match self {
            WorkflowOutcome::Single(record) => record.response.clone(),
            WorkflowOutcome::Combined { destination_info, travel_plan, .. } => {
                format!("{destination_info}\n\n---\n\n{travel_plan}")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub conversation_history: Vec<ConversationEntry>,
    pub user_preferences: ContextMap,
    pub travel_context: ContextMap,
    pub total_interactions: usize,
}

pub type Capabilities = IndexMap<&'static str, &'static [&'static str]>;

pub struct Orchestrator {
    classifier: KeywordClassifier,
    extractor: ContextExtractor,
    agents: Agents,
    clock: SharedClock,
    summary_turns: usize,
    history_window: usize,
}

impl Orchestrator {
    pub fn new(clock: SharedClock, config: &OrchestratorConfig, memory: &MemoryConfig) -> Result<Self, AppError> {
        Ok(Self {
            classifier: KeywordClassifier::new(),
            extractor: ContextExtractor::new()?,
            agents: Agents::new(clock.clone()),
            clock,
            summary_turns: config.summary_turns,
            history_window: memory.context_window,
        })
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    /// Route `request` to one agent and record the outcome.
    pub fn process_request(&self, memory: &mut TravelMemory, request: &str) -> RequestRecord {
        let request_id = Uuid::new_v4();
        memory.add_conversation(Role::User, request, None);

        let context = self.extractor.extract(request, memory);
        let kind = self.classifier.classify(request);
        info!(%request_id, agent = %kind, fields = context.len(), "orchestrator: routing request");

        match self.agents.process_request(kind, memory, request, &context) {
            Ok(response) => RequestRecord {
                request_id,
                user_request: request.to_string(),
                agent_used: kind.label().to_string(),
                extracted_context: context,
                response,
                timestamp: self.clock.now(),
                conversation_context: Some(memory.conversation_context(self.summary_turns)),
                error: None,
            },
            Err(e) => self.error_record(request_id, request, &e),
        }
    }

    fn error_record(&self, request_id: Uuid, request: &str, e: &AgentError) -> RequestRecord {
        warn!(%request_id, error = %e, "orchestrator: agent failed");
        RequestRecord {
            request_id,
            user_request: request.to_string(),
            agent_used: "error".to_string(),
            extracted_context: ContextMap::new(),
            response: format!("{ERROR_PREFIX}: {e}"),
            timestamp: self.clock.now(),
            conversation_context: None,
            error: Some(e.to_string()),
        }
    }

    pub fn wants_multi_agent(request: &str) -> bool {
        let lowered = request.to_lowercase();
        MULTI_AGENT_TRIGGERS.iter().any(|w| lowered.contains(w))
    }

    /// Run both agents for a complete-trip request, otherwise behave like
    /// [`process_request`](Self::process_request). Any agent failure falls
    /// back to the single-agent path.
    pub fn handle_multi_agent_workflow(&self, memory: &mut TravelMemory, request: &str) -> WorkflowOutcome {
        if !Self::wants_multi_agent(request) {
            return WorkflowOutcome::Single(self.process_request(memory, request));
        }

        let context = self.extractor.extract(request, memory);
        let destination = context.get_str("destination").unwrap_or("the destination").to_string();
        info!(%destination, "orchestrator: multi-agent workflow");

        let info_request =
            format!("Tell me about {destination} including weather, attractions, and travel tips");
        let travel_request = format!(
            "Create a complete travel plan for {destination} including itinerary, accommodations, and budget"
        );

        let combined = self
            .agents
            .process_request(AgentKind::Info, memory, &info_request, &context)
            .and_then(|info| {
                self.agents
                    .process_request(AgentKind::Travel, memory, &travel_request, &context)
                    .map(|plan| (info, plan))
            });

        match combined {
            Ok((destination_info, travel_plan)) => WorkflowOutcome::Combined {
                destination_info,
                travel_plan,
                context,
                timestamp: self.clock.now(),
            },
            Err(e) => {
                warn!(error = %e, "orchestrator: multi-agent workflow failed, falling back");
                WorkflowOutcome::Single(self.process_request(memory, request))
            }
        }
    }

    pub fn conversation_summary(&self, memory: &TravelMemory) -> ConversationSummary {
        ConversationSummary {
            conversation_history: memory.recent_conversation(self.history_window).to_vec(),
            user_preferences: memory.user_preferences().clone(),
            travel_context: memory.travel_context().clone(),
            total_interactions: memory.conversation_history().len(),
        }
    }

    pub fn update_user_preferences(&self, memory: &mut TravelMemory, preferences: &ContextMap) {
        memory.update_user_preferences(preferences);
    }

    pub fn clear_session(&self, memory: &mut TravelMemory) {
        info!("orchestrator: session cleared");
        memory.clear();
    }

    pub fn available_capabilities(&self) -> Capabilities {
        capabilities()
    }
}

pub fn capabilities() -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert(
        AgentKind::Info.name(),
        &[
            "Get destination information",
            "Check weather conditions",
            "Find attractions and activities",
            "Provide travel tips and advice",
            "Currency and payment information",
        ],
    );
    caps.insert(
        AgentKind::Travel.name(),
        &[
            "Create detailed itineraries",
            "Suggest accommodations",
            "Plan transportation",
            "Estimate travel budgets",
            "Generate packing lists",
        ],
    );
    caps
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::Config;

    fn setup() -> (Orchestrator, TravelMemory) {
        let clock: SharedClock = Arc::new(ManualClock::at_date(2025, 6, 1).unwrap());
        let cfg = Config::test_default();
        let orch = Orchestrator::new(clock.clone(), &cfg.orchestrator, &cfg.memory).unwrap();
        (orch, TravelMemory::with_clock(clock))
    }

    #[test]
    fn info_request_is_routed_and_recorded() {
        let (orch, mut memory) = setup();
        let record = orch.process_request(&mut memory, "What's the weather forecast in Tokyo?");
        assert_eq!(record.agent_used, "info_agent");
        assert_eq!(record.extracted_context.get_str("destination"), Some("Tokyo"));
        assert!(record.response.contains("Weather information for Tokyo"));
        assert!(record.error.is_none());
        // orchestrator user turn + agent user turn + agent reply
        assert_eq!(memory.conversation_history().len(), 3);
        let ctx = record.conversation_context.unwrap();
        assert!(ctx.starts_with("Recent conversation:\n"));
    }

    #[test]
    fn planning_request_goes_to_travel_agent() {
        let (orch, mut memory) = setup();
        let record = orch.process_request(
            &mut memory,
            "Plan a 5-day trip to Paris in June for 2 people with medium budget",
        );
        assert_eq!(record.agent_used, "travel_agent");
        assert_eq!(record.extracted_context.get_int("duration"), Some(5));
        assert!(record.response.contains("📅 **Day 5 - 2025-06-05**"));
    }

    #[test]
    fn trigger_words_run_both_agents() {
        let (orch, mut memory) = setup();
        let outcome = orch.handle_multi_agent_workflow(&mut memory, "I want a complete plan for Rome");
        match outcome {
            WorkflowOutcome::Combined { destination_info, travel_plan, context, .. } => {
                assert!(destination_info.contains("Weather information for Rome"));
                assert!(travel_plan.contains("Travel Itinerary for Rome"));
                assert_eq!(context.get_str("destination"), Some("Rome"));
            }
            other => panic!("expected combined outcome, got {other:?}"),
        }
        assert_eq!(memory.search_history().len(), 2);
    }

    #[test]
    fn no_trigger_words_is_single() {
        let (orch, mut memory) = setup();
        let outcome = orch.handle_multi_agent_workflow(&mut memory, "hotels in Lisbon");
        let WorkflowOutcome::Single(record) = outcome else {
            panic!("expected single outcome");
        };
        assert_eq!(record.agent_used, "travel_agent");
        let json = serde_json::to_value(WorkflowOutcome::Single(record)).unwrap();
        assert_eq!(json["type"], "single_agent_response");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn combined_without_destination_uses_placeholder() {
        let (orch, mut memory) = setup();
        let outcome = orch.handle_multi_agent_workflow(&mut memory, "give me everything");
        let WorkflowOutcome::Combined { destination_info, .. } = outcome else {
            panic!("expected combined outcome");
        };
        assert!(destination_info.contains("Weather information for Unknown"));
        assert_eq!(
            memory.conversation_history()[0].message,
            "Tell me about the destination including weather, attractions, and travel tips"
        );
    }

    #[test]
    fn summary_and_clear() {
        let (orch, mut memory) = setup();
        for i in 0..6 {
            orch.process_request(&mut memory, &format!("tips {i}"));
        }
        let summary = orch.conversation_summary(&memory);
        assert_eq!(summary.total_interactions, 18);
        assert_eq!(summary.conversation_history.len(), 10);

        let mut prefs = ContextMap::new();
        prefs.set("travel_style", "slow");
        orch.update_user_preferences(&mut memory, &prefs);
        assert_eq!(orch.conversation_summary(&memory).user_preferences.len(), 1);

        orch.clear_session(&mut memory);
        assert_eq!(orch.conversation_summary(&memory).total_interactions, 0);
    }

    #[test]
    fn error_record_shape() {
        let (orch, _) = setup();
        let e = AgentError::Render(std::fmt::Error);
        let record = orch.error_record(Uuid::new_v4(), "x", &e);
        assert_eq!(record.agent_used, "error");
        assert!(record.extracted_context.is_empty());
        assert!(record.response.starts_with("I encountered an error while processing your request: "));
        assert!(record.is_error());
    }

    #[test]
    fn capabilities_list_both_agents() {
        let caps = capabilities();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps["TravelAgent"][0], "Create detailed itineraries");
    }
}
