//! Keyword classifier: picks the agent for a request.

use std::fmt;

use serde::Serialize;

/// The two request handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgentKind {
    #[serde(rename = "info_agent")]
    Info,
    #[serde(rename = "travel_agent")]
    Travel,
}

impl AgentKind {
    /// Display name, used in conversation entries.
    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Info => "InfoAgent",
            AgentKind::Travel => "TravelAgent",
        }
    }

    /// Routing label, used in request records.
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Info => "info_agent",
            AgentKind::Travel => "travel_agent",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const INFO_KEYWORDS: &[&str] = &[
    "weather", "climate", "temperature", "forecast",
    "attractions", "places", "things to do", "sightseeing",
    "culture", "history", "museums", "landmarks",
    "tips", "advice", "customs", "local",
    "currency", "money", "exchange", "payment",
    "information", "about", "describe", "tell me",
    "what", "where", "when", "how",
];

pub const TRAVEL_KEYWORDS: &[&str] = &[
    "itinerary", "plan", "schedule", "organize",
    "accommodation", "hotel", "stay", "lodging",
    "transport", "flight", "train", "bus", "travel",
    "budget", "cost", "price", "expense", "estimate",
    "pack", "packing", "luggage", "bring",
    "book", "booking", "reserve", "reservation",
    "create", "suggest", "recommend",
];

/// Substring scorer over two fixed keyword lists.
///
/// Keywords are matched as raw substrings of the lower-cased request, so
/// overlapping entries ("pack" / "packing") both count. Ties go to travel.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    info: &'static [&'static str],
    travel: &'static [&'static str],
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self { info: INFO_KEYWORDS, travel: TRAVEL_KEYWORDS }
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// (info score, travel score).
    pub fn scores(&self, request: &str) -> (usize, usize) {
        let lowered = request.to_lowercase();
        let count = |keywords: &[&str]| keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        (count(self.info), count(self.travel))
    }

    pub fn classify(&self, request: &str) -> AgentKind {
        let (info, travel) = self.scores(request);
        if info > travel { AgentKind::Info } else { AgentKind::Travel }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_words_route_to_travel() {
        let c = KeywordClassifier::new();
        assert_eq!(c.classify("itinerary plan"), AgentKind::Travel);
        assert_eq!(c.classify("Suggest a hotel and estimate the cost"), AgentKind::Travel);
    }

    #[test]
    fn info_words_route_to_info() {
        let c = KeywordClassifier::new();
        assert_eq!(c.classify("weather forecast"), AgentKind::Info);
        assert_eq!(c.classify("What is the CURRENCY in Japan?"), AgentKind::Info);
    }

    #[test]
    fn ties_go_to_travel() {
        let c = KeywordClassifier::new();
        // "information" (info) vs "travel" (travel)
        assert_eq!(c.scores("travel information"), (1, 1));
        assert_eq!(c.classify("travel information"), AgentKind::Travel);
        assert_eq!(c.classify("zzz"), AgentKind::Travel);
        assert_eq!(c.classify(""), AgentKind::Travel);
    }

    #[test]
    fn overlapping_keywords_double_count() {
        let c = KeywordClassifier::new();
        let (_, travel) = c.scores("packing");
        assert_eq!(travel, 2);
    }

    #[test]
    fn names_and_labels() {
        assert_eq!(AgentKind::Info.name(), "InfoAgent");
        assert_eq!(AgentKind::Travel.label(), "travel_agent");
        assert_eq!(serde_json::to_string(&AgentKind::Travel).unwrap(), "\"travel_agent\"");
    }
}
