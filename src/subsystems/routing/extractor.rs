//! Context extractor: pulls trip fields out of a free-text request.

use regex::Regex;
use tracing::debug;

use crate::error::AppError;
use crate::subsystems::memory::{ContextMap, TravelMemory};
use crate::subsystems::tools::title_case;

/// Cities recognised as destinations, checked in this order.
pub const KNOWN_DESTINATIONS: &[&str] = &[
    "paris", "london", "tokyo", "new york", "rome", "barcelona",
    "amsterdam", "berlin", "prague", "vienna", "budapest", "lisbon",
    "dublin", "edinburgh", "venice", "florence", "milan", "madrid",
    "athens", "istanbul", "dubai", "singapore", "hong kong", "sydney",
    "los angeles", "san francisco", "chicago", "washington dc", "boston",
    "mumbai", "delhi", "bangalore", "bangkok", "seoul", "beijing",
];

const DATE_PATTERNS: &[&str] = &[
    r"\d{4}-\d{2}-\d{2}",
    r"\d{1,2}/\d{1,2}/\d{4}",
    r"(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}",
    r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+\d{1,2}",
];

const DURATION_PATTERNS: &[&str] = &[
    r"(\d+)(?:\s+|-)days?",
    r"(\d+)(?:\s+|-)weeks?",
    r"(\d+)(?:\s+|-)months?",
];

const TRAVELER_PATTERNS: &[&str] = &[
    r"(\d+)\s+people",
    r"(\d+)\s+travelers?",
    r"(\d+)\s+persons?",
    r"group\s+of\s+(\d+)",
];

/// Tier → keywords, checked in this order; first hit wins.
const BUDGET_TIERS: &[(&str, &[&str])] = &[
    ("luxury", &["luxury", "premium", "high-end", "expensive"]),
    ("medium", &["medium", "moderate", "mid-range", "reasonable"]),
    ("budget", &["budget", "cheap", "affordable", "low cost"]),
];

/// Pattern-based extractor. Patterns are compiled once at construction.
#[derive(Debug, Clone)]
pub struct ContextExtractor {
    dates: Vec<Regex>,
    durations: Vec<Regex>,
    travelers: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>, AppError> {
    patterns.iter().map(|p| Regex::new(p).map_err(AppError::from)).collect()
}

/// First capture group of the first pattern that matches, as an integer.
fn first_number(patterns: &[Regex], text: &str) -> Option<i64> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

impl ContextExtractor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            dates: compile(DATE_PATTERNS)?,
            durations: compile(DURATION_PATTERNS)?,
            travelers: compile(TRAVELER_PATTERNS)?,
        })
    }

    /// Fields found in `request` alone.
    pub fn extract_request(&self, request: &str) -> ContextMap {
        let lowered = request.to_lowercase();
        let mut context = ContextMap::new();

        if let Some(city) = KNOWN_DESTINATIONS.iter().find(|c| lowered.contains(*c)) {
            context.set("destination", title_case(city));
        }

        if let Some(m) = self.dates.iter().find_map(|re| re.find(&lowered)) {
            context.set("travel_date", m.as_str());
        }

        if let Some(days) = first_number(&self.durations, &lowered) {
            context.set("duration", days);
        }

        if let Some((tier, _)) = BUDGET_TIERS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        {
            context.set("budget_level", *tier);
        }

        if let Some(n) = first_number(&self.travelers, &lowered) {
            context.set("travelers", n);
        }

        context
    }

    /// Request fields, then the stored travel context, then user
    /// preferences; later sources overwrite earlier ones.
    pub fn extract(&self, request: &str, memory: &TravelMemory) -> ContextMap {
        let mut context = self.extract_request(request);
        context.merge(memory.travel_context());
        context.merge(memory.user_preferences());
        debug!(fields = context.len(), "extractor: context built");
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ContextExtractor {
        ContextExtractor::new().unwrap()
    }

    #[test]
    fn full_request_extracts_all_fields() {
        let ctx = extractor().extract_request(
            "Plan a 5-day trip to Paris in June for 2 people with medium budget",
        );
        assert_eq!(ctx.get_str("destination"), Some("Paris"));
        assert_eq!(ctx.get_int("duration"), Some(5));
        assert_eq!(ctx.get_int("travelers"), Some(2));
        assert_eq!(ctx.get_str("budget_level"), Some("medium"));
        assert!(!ctx.contains_key("travel_date"));
    }

    #[test]
    fn multi_word_city_is_title_cased() {
        let ctx = extractor().extract_request("flights to NEW YORK");
        assert_eq!(ctx.get_str("destination"), Some("New York"));
    }

    #[test]
    fn first_city_in_list_order_wins() {
        // "london" precedes "tokyo" in the list regardless of request order.
        let ctx = extractor().extract_request("tokyo or london?");
        assert_eq!(ctx.get_str("destination"), Some("London"));
    }

    #[test]
    fn date_patterns_in_priority_order() {
        let e = extractor();
        assert_eq!(e.extract_request("leaving 2025-07-01").get_str("travel_date"), Some("2025-07-01"));
        assert_eq!(e.extract_request("on 7/4/2025").get_str("travel_date"), Some("7/4/2025"));
        assert_eq!(e.extract_request("around March 15").get_str("travel_date"), Some("march 15"));
        assert_eq!(e.extract_request("around Sep 3").get_str("travel_date"), Some("sep 3"));
    }

    #[test]
    fn weeks_keep_the_number_only() {
        let ctx = extractor().extract_request("2 weeks in Rome");
        assert_eq!(ctx.get_int("duration"), Some(2));
    }

    #[test]
    fn luxury_tier_beats_budget_keyword() {
        let ctx = extractor().extract_request("luxury hotel, what budget?");
        assert_eq!(ctx.get_str("budget_level"), Some("luxury"));
        let ctx = extractor().extract_request("something cheap");
        assert_eq!(ctx.get_str("budget_level"), Some("budget"));
    }

    #[test]
    fn group_of_travelers() {
        let ctx = extractor().extract_request("a group of 6 friends");
        assert_eq!(ctx.get_int("travelers"), Some(6));
    }

    #[test]
    fn nothing_found_is_empty() {
        assert!(extractor().extract_request("hello there").is_empty());
    }

    #[test]
    fn memory_overrides_request() {
        let mut memory = TravelMemory::new();
        let mut travel = ContextMap::new();
        travel.set("destination", "Lisbon");
        travel.set("season", "summer");
        memory.set_travel_context(&travel);
        let mut prefs = ContextMap::new();
        prefs.set("destination", "Tokyo");
        memory.update_user_preferences(&prefs);

        let ctx = extractor().extract("3 days in Paris", &memory);
        assert_eq!(ctx.get_str("destination"), Some("Tokyo"));
        assert_eq!(ctx.get_str("season"), Some("summer"));
        assert_eq!(ctx.get_int("duration"), Some(3));
    }
}
