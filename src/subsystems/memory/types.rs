//! Value types held by the travel memory store.
//!
//! * [`ContextValue`]: a scalar or string list stored under a preference or
//!   context key. Untagged on the wire so snapshots read as plain JSON; any
//!   other JSON (null, mixed arrays, objects) is kept verbatim as `Other`.
//! * [`ContextMap`]: insertion-ordered key → value map used for both user
//!   preferences and the transient travel context.
//! * [`ConversationEntry`] / [`SearchRecord`]: the two append-only logs.

use std::fmt;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── ContextValue ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl ContextValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view. Numeric strings count, so `"5"` stored by a form field
    /// still reads as a duration.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ContextValue::Int(i) => Some(*i),
            ContextValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// List view. A single string is treated as a one-element list; a mixed
    /// JSON array keeps its items in string form, dropping nulls.
    pub fn as_list(&self) -> Option<Vec<String>> {
        match self {
            ContextValue::List(items) => Some(items.clone()),
            ContextValue::Str(s) if !s.is_empty() => Some(vec![s.clone()]),
            ContextValue::Other(serde_json::Value::Array(items)) => Some(
                items
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Bool(b) => write!(f, "{b}"),
            ContextValue::Int(i) => write!(f, "{i}"),
            ContextValue::Float(v) => write!(f, "{v}"),
            ContextValue::Str(s) => write!(f, "{s}"),
            ContextValue::List(items) => write!(f, "[{}]", items.join(", ")),
            ContextValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self { ContextValue::Bool(v) }
}
impl From<i64> for ContextValue {
    fn from(v: i64) -> Self { ContextValue::Int(v) }
}
impl From<f64> for ContextValue {
    fn from(v: f64) -> Self { ContextValue::Float(v) }
}
impl From<String> for ContextValue {
    fn from(v: String) -> Self { ContextValue::Str(v) }
}
impl From<&str> for ContextValue {
    fn from(v: &str) -> Self { ContextValue::Str(v.to_string()) }
}
impl From<Vec<String>> for ContextValue {
    fn from(v: Vec<String>) -> Self { ContextValue::List(v) }
}

// ── ContextMap ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextMap(IndexMap<String, ContextValue>);

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ContextValue::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ContextValue::as_int)
    }

    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).and_then(ContextValue::as_list)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Merge `other` into `self`; keys present in both take `other`'s value.
    pub fn merge(&mut self, other: &ContextMap) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContextValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for ContextMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ── Logs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub timestamp: DateTime<Local>,
    pub role: Role,
    pub message: String,
    /// Agent that produced or received the turn; `None` for orchestrator-level turns.
    #[serde(default)]
    pub agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub timestamp: DateTime<Local>,
    pub query: String,
    /// Provider payload, or `{"error": "..."}` when the provider failed.
    pub results: serde_json::Value,
    pub agent: String,
}
