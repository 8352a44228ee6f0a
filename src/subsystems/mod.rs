//! Subsystem modules for the travel assistant.

pub mod agents;
#[cfg(feature = "subsystem-llm")]
pub mod chat;
#[cfg(feature = "subsystem-comms")]
pub mod comms;
pub mod memory;
pub mod orchestrator;
#[cfg(feature = "subsystem-llm")]
pub mod prompts;
pub mod routing;
pub mod tools;
