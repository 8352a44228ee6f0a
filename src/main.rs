//! tripmate entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at the configured (or CLI) level
//!   4. Build the application context
//!   5. Run comms channels until Ctrl-C or stdin closes

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use tripmate::config::{self, Config, EnvOverrides};
use tripmate::context::AppContext;
use tripmate::error::AppError;
use tripmate::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let mut config = match args.config_path.as_deref() {
        Some(path) => config::load_from(Path::new(path), &EnvOverrides::from_env())?,
        None => config::load()?,
    };
    if args.http {
        config.comms.http.enabled = true;
    }
    if args.no_pty {
        config.comms.pty.enabled = false;
    }

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        app_name = %config.app_name,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    print_startup_summary(&config);

    let ctx = Arc::new(AppContext::new(config)?);

    // Shared shutdown token: Ctrl-C cancels it, every channel watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    #[cfg(feature = "subsystem-comms")]
    {
        let comms = tripmate::subsystems::comms::start(ctx.clone(), shutdown.clone());
        comms.join().await?;
    }
    #[cfg(not(feature = "subsystem-comms"))]
    {
        let _ = &ctx;
        shutdown.cancelled().await;
    }

    // Stdin EOF ends the console without Ctrl-C; stop the rest too.
    shutdown.cancel();

    {
        use std::io::Write as _;
        println!("\nBye :)");
        let _ = std::io::stdout().flush();
    }

    Ok(())
}

fn print_startup_summary(config: &Config) {
    let on_off = |b: bool| if b { "enabled" } else { "disabled" };
    println!("{} travel assistant (pid {})", config.app_name, std::process::id());
    #[cfg(feature = "subsystem-llm")]
    println!(
        "  llm      provider={} model={} temp={} timeout={}s key={}",
        config.llm.provider,
        config.llm.openai.model,
        config.llm.openai.temperature,
        config.llm.openai.timeout_seconds,
        if config.llm_api_key.is_some() { "set" } else { "unset" },
    );
    #[cfg(not(feature = "subsystem-llm"))]
    println!("  llm      disabled (not compiled)");
    println!("  console  {}", on_off(config.comms.pty.enabled));
    if config.comms.http.enabled {
        println!("  http     enabled on {}", config.comms.http.bind);
    } else {
        println!("  http     disabled");
    }
}

// ── CLI ───────────────────────────────────────────────────────────────────────

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    http: bool,
    no_pty: bool,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut http = false;
    let mut no_pty = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: tripmate [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("      --http                 Enable the HTTP API regardless of config");
                println!("      --no-pty               Disable the console channel");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--http" => http = true,
            "--no-pty" => no_pty = true,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    // -v warn, -vv info, -vvv debug, -vvvv+ trace
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path, http, no_pty }
}
