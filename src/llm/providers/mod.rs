//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory, called once at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod openai_compatible;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `LLM_API_KEY` / `OPENAI_API_KEY` (never TOML).
/// The hosted provider refuses to build without one.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "openai" | "openai-compatible" => {
            let Some(key) = api_key.filter(|k| !k.trim().is_empty()) else {
                return Err(ProviderError::MissingApiKey(config.provider.clone()));
            };
            let oai = &config.openai;
            let p = openai_compatible::OpenAiCompatibleProvider::new(
                oai.api_base_url.clone(),
                oai.model.clone(),
                oai.temperature,
                oai.max_tokens,
                oai.timeout_seconds,
                Some(key),
            )?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_dummy_without_key() {
        let cfg = Config::test_default();
        let p = build(&cfg.llm, None).unwrap();
        assert_eq!(p.name(), "dummy");
    }

    #[test]
    fn openai_requires_key() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "openai".into();
        assert!(matches!(build(&cfg.llm, None), Err(ProviderError::MissingApiKey(_))));
        assert!(matches!(build(&cfg.llm, Some("  ".into())), Err(ProviderError::MissingApiKey(_))));
        let p = build(&cfg.llm, Some("sk-test".into())).unwrap();
        assert_eq!(p.name(), "openai-compatible");
    }

    #[test]
    fn unknown_provider_errors() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "nope".into();
        assert!(matches!(build(&cfg.llm, None), Err(ProviderError::UnknownProvider(_))));
    }
}
