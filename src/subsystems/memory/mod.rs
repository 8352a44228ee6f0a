//! Travel memory: a process-lifetime store for one conversation.
//!
//! Four stores, all in memory:
//!
//! - conversation log (append-only [`ConversationEntry`] list)
//! - user preferences ([`ContextMap`], last write wins)
//! - travel context ([`ContextMap`], last write wins)
//! - search log (append-only [`SearchRecord`] list)
//!
//! Nothing survives a restart. [`TravelMemory::export`] / [`TravelMemory::import`]
//! move the whole state in and out as a [`MemorySnapshot`].

pub mod types;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{self, SharedClock};
use crate::error::AppError;

pub use types::{ContextMap, ContextValue, ConversationEntry, Role, SearchRecord};

/// Plain serialisable form of the whole store.
///
/// Missing keys deserialise to empty stores; there is no schema version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default)]
    pub conversation_history: Vec<ConversationEntry>,
    #[serde(default)]
    pub user_preferences: ContextMap,
    #[serde(default)]
    pub travel_context: ContextMap,
    #[serde(default)]
    pub search_history: Vec<SearchRecord>,
}

pub struct TravelMemory {
    clock: SharedClock,
    conversation_history: Vec<ConversationEntry>,
    user_preferences: ContextMap,
    travel_context: ContextMap,
    search_history: Vec<SearchRecord>,
}

impl Default for TravelMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelMemory {
    pub fn new() -> Self {
        Self::with_clock(clock::system())
    }

    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            clock,
            conversation_history: Vec::new(),
            user_preferences: ContextMap::new(),
            travel_context: ContextMap::new(),
            search_history: Vec::new(),
        }
    }

    // ── Writes ────────────────────────────────────────────────────────

    pub fn add_conversation(&mut self, role: Role, message: impl Into<String>, agent: Option<&str>) {
        let entry = ConversationEntry {
            timestamp: self.clock.now(),
            role,
            message: message.into(),
            agent: agent.map(str::to_string),
        };
        debug!(%role, agent = ?entry.agent, len = entry.message.len(), "memory: conversation entry");
        self.conversation_history.push(entry);
    }

    pub fn update_user_preferences(&mut self, preferences: &ContextMap) {
        self.user_preferences.merge(preferences);
    }

    pub fn set_travel_context(&mut self, context: &ContextMap) {
        self.travel_context.merge(context);
    }

    pub fn add_search_result(&mut self, query: impl Into<String>, results: serde_json::Value, agent: &str) {
        let record = SearchRecord {
            timestamp: self.clock.now(),
            query: query.into(),
            results,
            agent: agent.to_string(),
        };
        debug!(query = %record.query, %agent, "memory: search result");
        self.search_history.push(record);
    }

    /// Empty all four stores.
    pub fn clear(&mut self) {
        self.conversation_history.clear();
        self.user_preferences.clear();
        self.travel_context.clear();
        self.search_history.clear();
    }

    // ── Reads ─────────────────────────────────────────────────────────

    pub fn conversation_history(&self) -> &[ConversationEntry] {
        &self.conversation_history
    }

    /// The last `n` entries (all of them when fewer exist).
    pub fn recent_conversation(&self, n: usize) -> &[ConversationEntry] {
        let start = self.conversation_history.len().saturating_sub(n);
        &self.conversation_history[start..]
    }

    pub fn user_preferences(&self) -> &ContextMap {
        &self.user_preferences
    }

    pub fn travel_context(&self) -> &ContextMap {
        &self.travel_context
    }

    pub fn search_history(&self) -> &[SearchRecord] {
        &self.search_history
    }

    /// Render the last `last_n` turns as `role (agent): message` lines.
    pub fn conversation_context(&self, last_n: usize) -> String {
        let mut context = String::from("Recent conversation:\n");
        for entry in self.recent_conversation(last_n) {
            match &entry.agent {
                Some(agent) => {
                    context.push_str(&format!("{} ({agent}): {}\n", entry.role, entry.message))
                }
                None => context.push_str(&format!("{}: {}\n", entry.role, entry.message)),
            }
        }
        context
    }

    pub fn user_preferences_context(&self) -> String {
        render_map(
            &self.user_preferences,
            "User preferences:\n",
            "No user preferences stored yet.",
        )
    }

    pub fn travel_context_summary(&self) -> String {
        render_map(
            &self.travel_context,
            "Current travel planning context:\n",
            "No current travel planning context.",
        )
    }

    // ── Snapshot ──────────────────────────────────────────────────────

    pub fn export(&self) -> MemorySnapshot {
        MemorySnapshot {
            conversation_history: self.conversation_history.clone(),
            user_preferences: self.user_preferences.clone(),
            travel_context: self.travel_context.clone(),
            search_history: self.search_history.clone(),
        }
    }

    /// Replace all four stores with the snapshot's contents.
    pub fn import(&mut self, snapshot: MemorySnapshot) {
        self.conversation_history = snapshot.conversation_history;
        self.user_preferences = snapshot.user_preferences;
        self.travel_context = snapshot.travel_context;
        self.search_history = snapshot.search_history;
    }

    pub fn export_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(&self.export())
            .map_err(|e| AppError::Memory(format!("serialise snapshot: {e}")))
    }

    pub fn import_json(&mut self, data: &str) -> Result<(), AppError> {
        let snapshot: MemorySnapshot = serde_json::from_str(data)
            .map_err(|e| AppError::Memory(format!("malformed snapshot: {e}")))?;
        self.import(snapshot);
        Ok(())
    }
}

fn render_map(map: &ContextMap, header: &str, empty: &str) -> String {
    if map.is_empty() {
        return empty.to_string();
    }
    let mut out = String::from(header);
    for (key, value) in map.iter() {
        out.push_str(&format!("- {key}: {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;

    fn memory() -> TravelMemory {
        TravelMemory::with_clock(Arc::new(ManualClock::at_date(2025, 3, 14).unwrap()))
    }

    fn prefs() -> ContextMap {
        let mut p = ContextMap::new();
        p.set("destination", "Paris");
        p.set("budget_level", "medium");
        p.set("interests", vec!["art".to_string(), "food".to_string()]);
        p
    }

    #[test]
    fn appends_are_counted_exactly() {
        let mut m = memory();
        m.add_conversation(Role::User, "hello", None);
        let before = m.conversation_history().len();
        for i in 0..7 {
            m.add_conversation(Role::Assistant, format!("reply {i}"), Some("InfoAgent"));
        }
        assert_eq!(m.conversation_history().len(), before + 7);
        assert_eq!(m.conversation_history()[before].message, "reply 0");
    }

    #[test]
    fn clear_empties_all_stores() {
        let mut m = memory();
        m.add_conversation(Role::User, "hi", None);
        m.update_user_preferences(&prefs());
        m.set_travel_context(&prefs());
        m.add_search_result("weather_Paris", serde_json::json!({"ok": true}), "InfoAgent");
        m.clear();
        assert!(m.conversation_history().is_empty());
        assert!(m.user_preferences().is_empty());
        assert!(m.travel_context().is_empty());
        assert!(m.search_history().is_empty());
    }

    #[test]
    fn preferences_last_write_wins() {
        let mut m = memory();
        m.update_user_preferences(&prefs());
        let mut newer = ContextMap::new();
        newer.set("budget_level", "luxury");
        m.update_user_preferences(&newer);
        assert_eq!(m.user_preferences().get_str("budget_level"), Some("luxury"));
        assert_eq!(m.user_preferences().get_str("destination"), Some("Paris"));
    }

    #[test]
    fn conversation_context_shows_last_n_with_agent() {
        let mut m = memory();
        m.add_conversation(Role::User, "first", None);
        m.add_conversation(Role::User, "second", Some("TravelAgent"));
        m.add_conversation(Role::Assistant, "third", Some("TravelAgent"));
        let ctx = m.conversation_context(2);
        assert_eq!(
            ctx,
            "Recent conversation:\nuser (TravelAgent): second\nassistant (TravelAgent): third\n"
        );
        assert!(m.conversation_context(50).contains("user: first"));
    }

    #[test]
    fn context_strings_for_empty_and_filled_maps() {
        let mut m = memory();
        assert_eq!(m.user_preferences_context(), "No user preferences stored yet.");
        assert_eq!(m.travel_context_summary(), "No current travel planning context.");
        m.update_user_preferences(&prefs());
        assert_eq!(
            m.user_preferences_context(),
            "User preferences:\n- destination: Paris\n- budget_level: medium\n- interests: [art, food]\n"
        );
    }

    #[test]
    fn export_import_round_trip() {
        let mut m = memory();
        m.add_conversation(Role::User, "Plan a trip", None);
        m.add_conversation(Role::Assistant, "Sure", Some("TravelAgent"));
        m.update_user_preferences(&prefs());
        let mut ctx = ContextMap::new();
        ctx.set("duration", 4i64);
        m.set_travel_context(&ctx);
        m.add_search_result("budget_Paris_4days", serde_json::json!({"totals": {"daily_average": "$255"}}), "TravelAgent");

        let json = m.export_json().unwrap();
        let mut restored = memory();
        restored.import_json(&json).unwrap();
        assert_eq!(restored.export(), m.export());
    }

    #[test]
    fn import_missing_keys_defaults_to_empty() {
        let mut m = memory();
        m.add_conversation(Role::User, "will be replaced", None);
        m.import_json(r#"{"user_preferences": {"travel_style": "backpacking"}}"#).unwrap();
        assert!(m.conversation_history().is_empty());
        assert!(m.search_history().is_empty());
        assert_eq!(m.user_preferences().get_str("travel_style"), Some("backpacking"));
    }

    #[test]
    fn import_accepts_irregular_preference_values() {
        let mut m = memory();
        m.import_json(r#"{"user_preferences": {"interests": ["food", 2], "home_airport": null}}"#)
            .unwrap();
        assert_eq!(m.user_preferences().get_list("interests").unwrap(), vec!["food", "2"]);
        assert!(m.user_preferences().contains_key("home_airport"));
    }

    #[test]
    fn import_rejects_non_object() {
        let mut m = memory();
        assert!(m.import_json("[1, 2, 3]").is_err());
    }
}
