//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the file named by `TRIPMATE_CONFIG`), then applies the
//! `TRIPMATE_LOG_LEVEL` override. The LLM API key is read from the
//! environment only.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Console channel configuration.
#[derive(Debug, Clone)]
pub struct PtyConfig {
    pub enabled: bool,
}

/// JSON HTTP API channel configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub enabled: bool,
    /// Socket address the API listens on.
    pub bind: String,
}

#[derive(Debug, Clone)]
pub struct CommsConfig {
    pub pty: PtyConfig,
    pub http: HttpConfig,
}

/// OpenAI / OpenAI-compatible provider configuration (`[llm.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Active provider (`"dummy"`, `"openai"`, `"openai-compatible"`).
    /// Named `default` in the TOML.
    pub provider: String,
    pub openai: OpenAiConfig,
}

/// Dynamic prompt suggestion settings (`[prompts]`).
#[derive(Debug, Clone)]
pub struct PromptsConfig {
    pub enabled: bool,
    /// How long a fetched prompt list is served from cache.
    pub cache_seconds: u64,
    pub default_count: usize,
    /// Serve the built-in prompt list when the provider fails.
    pub fallback_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Turns included in a request record's conversation context.
    pub summary_turns: usize,
}

#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Default number of turns rendered by `conversation_context`.
    pub context_window: usize,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub log_level: String,
    pub orchestrator: OrchestratorConfig,
    pub memory: MemoryConfig,
    pub llm: LlmConfig,
    /// From `LLM_API_KEY` (or `OPENAI_API_KEY`). Never sourced from TOML.
    pub llm_api_key: Option<String>,
    pub prompts: PromptsConfig,
    pub comms: CommsConfig,
}

impl Config {
    /// Whether the configured provider can be used with the key we have.
    ///
    /// The dummy provider needs no key; every hosted provider does.
    pub fn llm_available(&self) -> bool {
        self.llm.provider == "dummy" || self.llm_api_key.is_some()
    }
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    app: RawApp,
    #[serde(default)]
    orchestrator: RawOrchestrator,
    #[serde(default)]
    memory: RawMemory,
    #[serde(default)]
    llm: RawLlm,
    #[serde(default)]
    prompts: RawPrompts,
    #[serde(default)]
    comms: RawComms,
}

#[derive(Deserialize)]
struct RawApp {
    #[serde(default = "default_app_name")]
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawApp {
    fn default() -> Self {
        Self { name: default_app_name(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawOrchestrator {
    #[serde(default = "default_summary_turns")]
    summary_turns: usize,
}

impl Default for RawOrchestrator {
    fn default() -> Self {
        Self { summary_turns: default_summary_turns() }
    }
}

#[derive(Deserialize)]
struct RawMemory {
    #[serde(default = "default_context_window")]
    context_window: usize,
}

impl Default for RawMemory {
    fn default() -> Self {
        Self { context_window: default_context_window() }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            max_tokens: default_openai_max_tokens(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawPrompts {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_prompt_cache_seconds")]
    cache_seconds: u64,
    #[serde(default = "default_prompt_count")]
    default_count: usize,
    #[serde(default = "default_true")]
    fallback_enabled: bool,
}

impl Default for RawPrompts {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_seconds: default_prompt_cache_seconds(),
            default_count: default_prompt_count(),
            fallback_enabled: true,
        }
    }
}

#[derive(Deserialize, Default)]
struct RawComms {
    #[serde(default)]
    pty: RawPty,
    #[serde(default)]
    http: RawHttp,
}

#[derive(Deserialize)]
struct RawPty {
    /// Defaults to `true`: the console is the out-of-the-box front end.
    #[serde(default = "default_true")]
    enabled: bool,
}

impl Default for RawPty {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Deserialize)]
struct RawHttp {
    /// Defaults to `false`: the HTTP API must be explicitly enabled.
    #[serde(default = "default_false")]
    enabled: bool,
    #[serde(default = "default_http_bind")]
    bind: String,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self { enabled: false, bind: default_http_bind() }
    }
}

fn default_app_name() -> String { "tripmate".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_summary_turns() -> usize { 5 }
fn default_context_window() -> usize { 10 }
fn default_llm_provider() -> String { "dummy".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_openai_temperature() -> f32 { 0.7 }
fn default_openai_max_tokens() -> u32 { 1000 }
fn default_openai_timeout_seconds() -> u64 { 60 }
fn default_prompt_cache_seconds() -> u64 { 300 }
fn default_prompt_count() -> usize { 8 }
fn default_http_bind() -> String { "127.0.0.1:8080".to_string() }
fn default_true() -> bool { true }
fn default_false() -> bool { false }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Overrides normally sourced from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub log_level: Option<String>,
    pub llm_api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("TRIPMATE_LOG_LEVEL").ok(),
            llm_api_key: env::var("LLM_API_KEY")
                .ok()
                .or_else(|| env::var("OPENAI_API_KEY").ok())
                .filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Load config from `TRIPMATE_CONFIG` or `config/default.toml`, then apply
/// env-var overrides. A missing default file is not an error: every field
/// has a default.
pub fn load() -> Result<Config, AppError> {
    let overrides = EnvOverrides::from_env();
    match env::var("TRIPMATE_CONFIG") {
        Ok(path) => load_from(Path::new(&path), &overrides),
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_from(&path, &overrides)
            } else {
                Ok(resolve(RawConfig::default(), &overrides))
            }
        }
    }
}

/// Load from an explicit path. Tests pass overrides directly instead of
/// mutating env vars.
pub fn load_from(path: &Path, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;
    Ok(resolve(parsed, overrides))
}

fn resolve(parsed: RawConfig, overrides: &EnvOverrides) -> Config {
    let log_level = overrides
        .log_level
        .clone()
        .unwrap_or(parsed.app.log_level);

    Config {
        app_name: parsed.app.name,
        log_level,
        orchestrator: OrchestratorConfig {
            summary_turns: parsed.orchestrator.summary_turns,
        },
        memory: MemoryConfig {
            context_window: parsed.memory.context_window,
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                temperature: parsed.llm.openai.temperature,
                max_tokens: parsed.llm.openai.max_tokens,
                timeout_seconds: parsed.llm.openai.timeout_seconds,
            },
        },
        llm_api_key: overrides.llm_api_key.clone(),
        prompts: PromptsConfig {
            enabled: parsed.prompts.enabled,
            cache_seconds: parsed.prompts.cache_seconds,
            default_count: parsed.prompts.default_count,
            fallback_enabled: parsed.prompts.fallback_enabled,
        },
        comms: CommsConfig {
            pty: PtyConfig { enabled: parsed.comms.pty.enabled },
            http: HttpConfig {
                enabled: parsed.comms.http.enabled,
                bind: parsed.comms.http.bind,
            },
        },
    }
}

// ── test helpers ──────────────────────────────────────────────────────────────

impl Config {
    /// Safe `Config` for tests: dummy LLM, no API key, no listeners.
    pub fn test_default() -> Self {
        let mut cfg = resolve(RawConfig::default(), &EnvOverrides::default());
        cfg.app_name = "test".into();
        cfg.comms.pty.enabled = false;
        cfg.llm.openai.api_base_url = "http://localhost:0/v1/chat/completions".into();
        cfg.llm.openai.model = "test-model".into();
        cfg.llm.openai.timeout_seconds = 1;
        cfg
    }
}
