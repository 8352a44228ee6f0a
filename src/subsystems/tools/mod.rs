//! Mock travel data providers.
//!
//! Every provider is a pure function of its inputs returning
//! `Result<Payload, ToolError>`. Payloads are regenerated on each call from
//! static tables with the caller's values echoed into templates; nothing is
//! fetched, cached or randomised.
//!
//! Information providers live in [`info`], planning providers in [`planning`].

pub mod info;
pub mod planning;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Failure reason for a single provider call.
///
/// Display text always reads `Failed to <action>: <reason>` so agents can
/// render it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Failed to {action}: invalid start date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { action: &'static str, value: String },

    #[error("Failed to {action}: {days} days exceeds the {max}-day limit")]
    DurationTooLong { action: &'static str, days: u32, max: u32 },

    #[error("Failed to {action}: unknown budget level '{level}'")]
    UnknownBudgetLevel { action: &'static str, level: String },

    #[error("Failed to {action}: totals for {travelers} travelers over {days} days are too large")]
    TotalTooLarge { action: &'static str, days: u32, travelers: u32 },
}

impl ToolError {
    /// JSON shape stored in the search log for a failed call.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Spending tier shared by the planning providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Budget,
    Medium,
    Luxury,
}

impl BudgetLevel {
    pub const ALL: [BudgetLevel; 3] = [BudgetLevel::Budget, BudgetLevel::Medium, BudgetLevel::Luxury];

    pub fn parse(level: &str) -> Option<Self> {
        match level.trim().to_ascii_lowercase().as_str() {
            "budget" => Some(BudgetLevel::Budget),
            "medium" => Some(BudgetLevel::Medium),
            "luxury" => Some(BudgetLevel::Luxury),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BudgetLevel::Budget => "budget",
            BudgetLevel::Medium => "medium",
            BudgetLevel::Luxury => "luxury",
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered label → note table, serialised as a JSON object.
pub type NoteTable = IndexMap<&'static str, &'static str>;

pub(crate) fn notes(pairs: &[(&'static str, &'static str)]) -> NoteTable {
    pairs.iter().copied().collect()
}

/// `"money_saving_tips"` → `"Money Saving Tips"`.
pub fn label_title(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Upper-case the first letter of every word, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
