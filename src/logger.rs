//! Structured logging to stderr through tracing-subscriber.
//!
//! The console channel owns stdout, so log lines never mix with replies.
//! HTTP client internals are held at `warn` unless a directive names them.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::error::AppError;

/// Targets that flood `debug` with connection chatter.
const QUIET_TARGETS: &[&str] = &["hyper_util=warn", "reqwest=warn"];

/// Install the global subscriber. Fails if one is already set.
///
/// `level` comes from `-v` flags or config; `prefer_level` is true when it
/// came from the command line, which then outranks `RUST_LOG`.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, prefer_level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Pick the filter from the configured level and the `RUST_LOG` value.
///
/// The preferred source is tried first and the other is the fallback when
/// it does not parse; both failing is an error naming both.
fn build_filter(level: &str, prefer_level: bool, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    let from_level = EnvFilter::try_new(level).map_err(|e| format!("invalid log level '{level}': {e}"));
    let from_env = match rust_log {
        Some(spec) => EnvFilter::try_new(spec).map_err(|e| format!("RUST_LOG '{spec}' did not parse: {e}")),
        None => Err("RUST_LOG not set".to_string()),
    };

    let (first, second) = if prefer_level { (from_level, from_env) } else { (from_env, from_level) };
    let mut filter = match (first, second) {
        (Ok(filter), _) | (Err(_), Ok(filter)) => filter,
        (Err(first_err), Err(second_err)) => return Err(AppError::Logger(format!("{first_err}; {second_err}"))),
    };

    for target in QUIET_TARGETS {
        let directive: Directive = target
            .parse()
            .map_err(|e| AppError::Logger(format!("bad built-in directive '{target}': {e}")))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    fn max_level(level: &str, prefer_level: bool, rust_log: Option<&str>) -> Option<LevelFilter> {
        build_filter(level, prefer_level, rust_log).unwrap().max_level_hint()
    }

    #[test]
    fn cli_level_outranks_rust_log() {
        assert_eq!(max_level("debug", true, Some("trace")), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_outranks_config_level() {
        assert_eq!(max_level("info", false, Some("trace")), Some(LevelFilter::TRACE));
        assert_eq!(max_level("warn", false, None), Some(LevelFilter::WARN));
    }

    #[test]
    fn unparsable_source_falls_back_to_the_other() {
        assert_eq!(max_level("info", false, Some("tripmate=loud")), Some(LevelFilter::INFO));
        assert_eq!(max_level("tripmate=loud", true, Some("info")), Some(LevelFilter::INFO));
    }

    #[test]
    fn both_sources_bad_names_both() {
        let err = build_filter("tripmate=loud", true, None).unwrap_err();
        let AppError::Logger(msg) = err else { panic!("expected logger error") };
        assert!(msg.contains("invalid log level 'tripmate=loud'"));
        assert!(msg.contains("RUST_LOG not set"));
    }

    #[test]
    fn http_client_noise_is_capped() {
        let filter = build_filter("trace", true, None).unwrap().to_string();
        assert!(filter.contains("reqwest=warn"), "{filter}");
        assert!(filter.contains("hyper_util=warn"), "{filter}");
    }
}
