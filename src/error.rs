//! Application-wide error types.
//!
//! Only startup and channel failures surface as [`AppError`]; request-level
//! failures have their own per-layer types (`ToolError`, `AgentError`,
//! `ProviderError`) and are turned into user-facing text before they get here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("memory error: {0}")]
    Memory(String),

    #[error("comms error: {0}")]
    Comms(String),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
