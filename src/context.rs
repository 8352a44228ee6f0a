//! Application context built once at startup and shared by every channel.
//!
//! The memory store sits behind a single async mutex, so requests from all
//! channels are handled one at a time against the same conversation. The LLM
//! components are optional: they are only built when the configured provider
//! is usable.

use tokio::sync::Mutex;
use tracing::info;
#[cfg(feature = "subsystem-llm")]
use tracing::warn;

use crate::clock::{self, SharedClock};
use crate::config::Config;
use crate::error::AppError;
use crate::subsystems::memory::TravelMemory;
use crate::subsystems::orchestrator::Orchestrator;

#[cfg(feature = "subsystem-llm")]
use crate::llm::{CompletionOptions, LlmProvider, providers};
#[cfg(feature = "subsystem-llm")]
use crate::subsystems::chat::TravelChat;
#[cfg(feature = "subsystem-llm")]
use crate::subsystems::prompts::PromptFetcher;

pub struct AppContext {
    pub config: Config,
    pub clock: SharedClock,
    pub orchestrator: Orchestrator,
    pub memory: Mutex<TravelMemory>,
    /// `None` when no usable LLM provider is configured.
    #[cfg(feature = "subsystem-llm")]
    pub chat: Option<TravelChat>,
    /// `None` when prompts are disabled or no provider is usable.
    #[cfg(feature = "subsystem-llm")]
    pub prompts: Option<Mutex<PromptFetcher>>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, AppError> {
        Self::with_clock(config, clock::system())
    }

    /// Build with an explicit clock. Tests pass a `ManualClock`.
    pub fn with_clock(config: Config, clock: SharedClock) -> Result<Self, AppError> {
        let orchestrator = Orchestrator::new(clock.clone(), &config.orchestrator, &config.memory)?;
        let memory = Mutex::new(TravelMemory::with_clock(clock.clone()));

        #[cfg(feature = "subsystem-llm")]
        let (chat, prompts) = match build_provider(&config) {
            Some(provider) => {
                let options = CompletionOptions {
                    max_tokens: Some(config.llm.openai.max_tokens),
                    temperature: Some(config.llm.openai.temperature),
                };
                let prompts = config
                    .prompts
                    .enabled
                    .then(|| Mutex::new(PromptFetcher::new(provider.clone(), clock.clone(), &config.prompts)));
                let chat = TravelChat::new(provider, options, clock.clone(), config.llm_api_key.is_some());
                (Some(chat), prompts)
            }
            None => (None, None),
        };

        info!(
            app_name = %config.app_name,
            llm_provider = %config.llm.provider,
            "application context ready"
        );

        Ok(Self {
            config,
            clock,
            orchestrator,
            memory,
            #[cfg(feature = "subsystem-llm")]
            chat,
            #[cfg(feature = "subsystem-llm")]
            prompts,
        })
    }

    /// Whether the LLM chat path is available.
    pub fn chat_enabled(&self) -> bool {
        #[cfg(feature = "subsystem-llm")]
        {
            self.chat.is_some()
        }
        #[cfg(not(feature = "subsystem-llm"))]
        {
            false
        }
    }
}

#[cfg(feature = "subsystem-llm")]
fn build_provider(config: &Config) -> Option<LlmProvider> {
    if !config.llm_available() {
        warn!(
            provider = %config.llm.provider,
            "no LLM API key set (LLM_API_KEY / OPENAI_API_KEY); chat and prompt suggestions disabled"
        );
        return None;
    }
    match providers::build(&config.llm, config.llm_api_key.clone()) {
        Ok(provider) => Some(provider),
        Err(e) => {
            warn!(error = %e, "LLM provider unavailable; chat and prompt suggestions disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;

    fn clock() -> SharedClock {
        Arc::new(ManualClock::at_date(2025, 6, 1).unwrap())
    }

    #[cfg(feature = "subsystem-llm")]
    #[test]
    fn dummy_provider_enables_llm_components() {
        let ctx = AppContext::with_clock(Config::test_default(), clock()).unwrap();
        assert!(ctx.chat_enabled());
        assert!(ctx.prompts.is_some());
    }

    #[test]
    fn missing_key_disables_llm_components() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "openai".into();
        let ctx = AppContext::with_clock(cfg, clock()).unwrap();
        assert!(!ctx.chat_enabled());
        #[cfg(feature = "subsystem-llm")]
        assert!(ctx.prompts.is_none());
    }

    #[cfg(feature = "subsystem-llm")]
    #[test]
    fn prompts_can_be_disabled_alone() {
        let mut cfg = Config::test_default();
        cfg.prompts.enabled = false;
        let ctx = AppContext::with_clock(cfg, clock()).unwrap();
        assert!(ctx.chat_enabled());
        assert!(ctx.prompts.is_none());
    }

    #[tokio::test]
    async fn memory_starts_empty() {
        let ctx = AppContext::with_clock(Config::test_default(), clock()).unwrap();
        assert!(ctx.memory.lock().await.conversation_history().is_empty());
    }
}
