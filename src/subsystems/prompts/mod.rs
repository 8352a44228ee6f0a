//! Example prompt suggestions generated by the LLM provider.
//!
//! A fetched list is cached for `cache_seconds`; while fresh, requests are
//! served by sampling the cache. Provider failures fall back to a fixed list
//! of built-in prompts (unless disabled in config).

use std::fmt;

use chrono::{DateTime, Duration, Local};
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::clock::SharedClock;
use crate::config::PromptsConfig;
use crate::llm::{ChatMessage, CompletionOptions, LlmProvider};
use crate::subsystems::memory::ContextMap;

/// Most prompts kept from a free-text reply.
pub const MAX_EXTRACTED: usize = 20;

/// Most prompts a single request may ask for.
pub const MAX_PROMPTS: usize = 50;

pub const FALLBACK_PROMPTS: &[&str] = &[
    "Plan a weekend getaway for two people with a moderate budget",
    "What are the best attractions in Paris for first-time visitors?",
    "Create a 7-day itinerary for Japan in spring",
    "Suggest budget-friendly accommodations in Barcelona",
    "What's the weather like in Thailand during monsoon season?",
    "Plan a family trip to Disney World for 5 days",
    "Recommend restaurants in Rome for food lovers",
    "Create a packing list for a winter trip to Iceland",
    "Suggest activities in New York City for art enthusiasts",
    "Plan a romantic getaway to Santorini for a couple",
    "What are the visa requirements for traveling to India?",
    "Create a budget estimate for a month-long backpacking trip in Europe",
];

const FETCH_OPTIONS: CompletionOptions = CompletionOptions { max_tokens: Some(800), temperature: Some(0.8) };
const CONTEXTUAL_OPTIONS: CompletionOptions = CompletionOptions { max_tokens: Some(400), temperature: Some(0.7) };

// ── Category ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptCategory {
    #[default]
    General,
    Planning,
    Information,
    Budget,
    Accommodation,
    Activities,
}

impl PromptCategory {
    /// Unknown names map to `General`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "planning" => PromptCategory::Planning,
            "information" => PromptCategory::Information,
            "budget" => PromptCategory::Budget,
            "accommodation" => PromptCategory::Accommodation,
            "activities" => PromptCategory::Activities,
            _ => PromptCategory::General,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptCategory::General => "general",
            PromptCategory::Planning => "planning",
            PromptCategory::Information => "information",
            PromptCategory::Budget => "budget",
            PromptCategory::Accommodation => "accommodation",
            PromptCategory::Activities => "activities",
        }
    }

    fn request(self, count: usize) -> String {
        match self {
            PromptCategory::General => format!(
                "Generate {count} diverse travel planning prompts covering various aspects like itinerary planning, destination research, budget planning, and travel tips."
            ),
            PromptCategory::Planning => format!(
                "Generate {count} travel planning prompts focused on itinerary creation, trip organization, and travel logistics."
            ),
            PromptCategory::Information => format!(
                "Generate {count} travel information prompts about destinations, weather, attractions, and cultural insights."
            ),
            PromptCategory::Budget => format!(
                "Generate {count} budget-focused travel prompts about cost estimation, money-saving tips, and financial planning for trips."
            ),
            PromptCategory::Accommodation => format!(
                "Generate {count} accommodation-related travel prompts about hotels, booking, and lodging recommendations."
            ),
            PromptCategory::Activities => format!(
                "Generate {count} activity-focused travel prompts about attractions, tours, and things to do at destinations."
            ),
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Cache ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PromptCache {
    pub prompts: Vec<String>,
    pub fetched_at: DateTime<Local>,
}

impl PromptCache {
    pub fn is_fresh(&self, now: DateTime<Local>, ttl: Duration) -> bool {
        !self.prompts.is_empty() && now - self.fetched_at < ttl
    }

    /// `count` random entries, or every entry when the cache is smaller.
    fn sample(&self, count: usize) -> Vec<String> {
        if self.prompts.len() < count {
            return self.prompts.clone();
        }
        let mut rng = rand::thread_rng();
        self.prompts.choose_multiple(&mut rng, count).cloned().collect()
    }
}

// ── Reply parsing ─────────────────────────────────────────────────────────────

/// Outcome of reading a provider reply as a prompt list.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    /// Valid JSON array; non-string items are kept in their JSON form.
    List(Vec<String>),
    /// Valid JSON, but not an array.
    NotAList,
    /// Not JSON at all.
    Text,
}

pub fn parse_reply(text: &str) -> ParsedReply {
    match serde_json::from_str::<serde_json::Value>(text.trim()) {
        Ok(serde_json::Value::Array(items)) => ParsedReply::List(
            items
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        Ok(_) => ParsedReply::NotAList,
        Err(_) => ParsedReply::Text,
    }
}

/// Pull prompt-like lines out of free text.
///
/// Leading numbering, bullets and quotes are stripped, as are trailing
/// quotes. A line is kept when it is a question longer than 10 characters
/// or mentions "plan" or "trip".
pub fn extract_prompts_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || ".- \"'".contains(c))
                .trim_end_matches(['"', '\''])
        })
        .filter(|line| {
            let lowered = line.to_lowercase();
            (line.chars().count() > 10 && line.contains('?'))
                || lowered.contains("plan")
                || lowered.contains("trip")
        })
        .take(MAX_EXTRACTED)
        .map(str::to_string)
        .collect()
}

pub fn fallback_prompts(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    FALLBACK_PROMPTS
        .choose_multiple(&mut rng, count.min(FALLBACK_PROMPTS.len()))
        .map(|s| s.to_string())
        .collect()
}

/// One-paragraph summary of the preference fields that shape suggestions.
pub fn preferences_summary(preferences: &ContextMap) -> String {
    let mut text = String::new();
    if let Some(v) = preferences.get("preferred_destinations") {
        text.push_str(&format!("Interested in destinations: {v}. "));
    }
    if let Some(v) = preferences.get("budget_level") {
        text.push_str(&format!("Budget level: {v}. "));
    }
    if let Some(v) = preferences.get("travel_style") {
        text.push_str(&format!("Travel style: {v}. "));
    }
    if let Some(interests) = preferences.get_list("interests").filter(|i| !i.is_empty()) {
        text.push_str(&format!("Interests: {}. ", interests.join(", ")));
    }
    text
}

// ── Fetcher ───────────────────────────────────────────────────────────────────

pub struct PromptFetcher {
    provider: LlmProvider,
    clock: SharedClock,
    ttl: Duration,
    fallback_enabled: bool,
    cache: Option<PromptCache>,
}

impl PromptFetcher {
    pub fn new(provider: LlmProvider, clock: SharedClock, config: &PromptsConfig) -> Self {
        let ttl = i64::try_from(config.cache_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::weeks(52));
        Self {
            provider,
            clock,
            ttl,
            fallback_enabled: config.fallback_enabled,
            cache: None,
        }
    }

    pub fn cache(&self) -> Option<&PromptCache> {
        self.cache.as_ref()
    }

    /// Drop the cached list so the next call asks the provider again.
    pub fn refresh_cache(&mut self) {
        self.cache = None;
    }

    fn fallback(&self, count: usize) -> Vec<String> {
        if self.fallback_enabled { fallback_prompts(count) } else { Vec::new() }
    }

    fn store(&mut self, prompts: Vec<String>, count: usize) -> Vec<String> {
        let head = prompts.iter().take(count).cloned().collect();
        self.cache = Some(PromptCache { prompts, fetched_at: self.clock.now() });
        head
    }

    pub async fn fetch_travel_prompts(&mut self, count: usize, category: &str) -> Vec<String> {
        let now = self.clock.now();
        if let Some(cache) = self.cache.as_ref().filter(|c| c.is_fresh(now, self.ttl)) {
            debug!(cached = cache.prompts.len(), count, "prompts: serving from cache");
            return cache.sample(count);
        }

        let category = PromptCategory::parse(category);
        let system = format!(
            "You are a travel planning assistant. Generate {count} realistic and diverse travel planning prompts that users might ask.

The prompts should be:
- Practical and realistic
- Varied in scope (short trips, long trips, different budgets, different destinations)
- Include different types of requests (planning, information, suggestions)
- Consider current time context (it's {})
- Mix of domestic and international destinations
- Different travel styles (family, solo, romantic, business, adventure)

Focus on category: {category}

Return only a JSON array of strings, no other text.",
            now.format("%B %Y")
        );
        let messages = [ChatMessage::system(system), ChatMessage::user(category.request(count))];

        let reply = match self.provider.complete(&messages, FETCH_OPTIONS).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, %category, "prompts: provider failed, using fallback");
                return self.fallback(count);
            }
        };

        let prompts = match parse_reply(&reply) {
            ParsedReply::List(list) => list,
            ParsedReply::Text => extract_prompts_from_text(&reply),
            ParsedReply::NotAList => Vec::new(),
        };
        if prompts.is_empty() {
            warn!(%category, "prompts: nothing usable in reply, using fallback");
            return self.fallback(count);
        }
        info!(%category, fetched = prompts.len(), "prompts: cache refreshed");
        self.store(prompts, count)
    }

    /// Suggestions shaped by the stored preferences; falls back to general
    /// prompts when the provider fails or returns anything but a JSON array.
    pub async fn contextual_prompts(&mut self, preferences: &ContextMap, count: usize) -> Vec<String> {
        let summary = preferences_summary(preferences);
        let messages = [
            ChatMessage::system(format!(
                "Generate {count} personalized travel prompts based on the user's preferences: {summary}

The prompts should be relevant to their interests and preferences. Return only a JSON array of strings."
            )),
            ChatMessage::user(format!("Create {count} travel prompts that match my preferences.")),
        ];

        match self.provider.complete(&messages, CONTEXTUAL_OPTIONS).await {
            Ok(reply) => {
                if let ParsedReply::List(list) = parse_reply(&reply) {
                    return list.into_iter().take(count).collect();
                }
                debug!("prompts: contextual reply was not a list");
            }
            Err(e) => warn!(error = %e, "prompts: contextual request failed"),
        }
        self.fetch_travel_prompts(count, PromptCategory::General.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use crate::llm::providers;

    fn fetcher(clock: Arc<ManualClock>) -> PromptFetcher {
        let cfg = Config::test_default();
        let provider = providers::build(&cfg.llm, None).unwrap();
        PromptFetcher::new(provider, clock, &cfg.prompts)
    }

    #[test]
    fn category_parse_defaults_to_general() {
        assert_eq!(PromptCategory::parse("Budget"), PromptCategory::Budget);
        assert_eq!(PromptCategory::parse("nightlife"), PromptCategory::General);
    }

    #[test]
    fn cache_freshness_is_pure() {
        let t0 = Local::now();
        let cache = PromptCache { prompts: vec!["a".into()], fetched_at: t0 };
        let ttl = Duration::seconds(300);
        assert!(cache.is_fresh(t0 + Duration::seconds(299), ttl));
        assert!(!cache.is_fresh(t0 + Duration::seconds(300), ttl));
        let empty = PromptCache { prompts: vec![], fetched_at: t0 };
        assert!(!empty.is_fresh(t0, ttl));
    }

    #[test]
    fn parse_reply_variants() {
        assert_eq!(parse_reply(r#"["a?", "b"]"#), ParsedReply::List(vec!["a?".into(), "b".into()]));
        assert_eq!(parse_reply(r#"{"a": 1}"#), ParsedReply::NotAList);
        assert_eq!(parse_reply("1. Plan a trip"), ParsedReply::Text);
    }

    #[test]
    fn extraction_strips_numbering_and_quotes() {
        let text = "Here are some ideas:\n1. \"What should I see in Kyoto?\"\n2. Plan a road trip\n- ok?\n\n3. 'Best beaches'";
        let got = extract_prompts_from_text(text);
        assert_eq!(got, vec!["What should I see in Kyoto?", "Plan a road trip"]);
    }

    #[test]
    fn extraction_caps_at_twenty() {
        let text = (0..30).map(|i| format!("{i}. trip idea")).collect::<Vec<_>>().join("\n");
        assert_eq!(extract_prompts_from_text(&text).len(), MAX_EXTRACTED);
    }

    #[test]
    fn fallback_samples_without_repeats() {
        let got = fallback_prompts(5);
        assert_eq!(got.len(), 5);
        let mut dedup = got.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 5);
        assert_eq!(fallback_prompts(50).len(), FALLBACK_PROMPTS.len());
    }

    #[test]
    fn preferences_summary_lists_known_fields() {
        let mut prefs = ContextMap::new();
        prefs.set("budget_level", "luxury");
        prefs.set("interests", vec!["food".to_string(), "art".to_string()]);
        prefs.set("ignored", "x");
        assert_eq!(preferences_summary(&prefs), "Budget level: luxury. Interests: food, art. ");
    }

    #[tokio::test]
    async fn echo_reply_is_extracted_and_cached() {
        // The dummy provider echoes the category request, which mentions "planning".
        let clock = Arc::new(ManualClock::at_date(2025, 1, 1).unwrap());
        let mut f = fetcher(clock.clone());
        let got = f.fetch_travel_prompts(3, "planning").await;
        assert_eq!(got.len(), 1);
        assert!(got[0].starts_with("[echo] Generate 3 travel planning prompts"));
        assert!(f.cache().is_some());

        // Served from cache while fresh.
        clock.advance(Duration::seconds(10));
        assert_eq!(f.fetch_travel_prompts(3, "budget").await, got);

        f.refresh_cache();
        assert!(f.cache().is_none());
    }

    #[tokio::test]
    async fn contextual_falls_back_to_general() {
        let clock = Arc::new(ManualClock::at_date(2025, 1, 1).unwrap());
        let mut f = fetcher(clock);
        let got = f.contextual_prompts(&ContextMap::new(), 4).await;
        assert!(got[0].contains("Generate 4 diverse travel planning prompts"));
    }
}
