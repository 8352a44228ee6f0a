//! tripmate: a demo multi-agent travel assistant.
//!
//! Requests are routed by keyword to an information agent or a planning
//! agent, both backed by deterministic mock data. An optional LLM chat and
//! prompt suggester sit alongside, exposed over a console and a JSON API.

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
#[cfg(feature = "subsystem-llm")]
pub mod llm;
pub mod logger;
pub mod subsystems;
