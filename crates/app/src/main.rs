use std::fmt;

use anyhow::Context;
use app::config::parse_bind;
use app::{AppConfig, AppState, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBind { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  vocab-console serve [--api <url>] [--bind <addr>] [--secure-cookies]");
    eprintln!("  vocab-console check [--api <url>] [--bind <addr>] [--secure-cookies]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api  http://localhost:8080");
    eprintln!("  --bind 127.0.0.1:3000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAB_API_BASE_URL (or INTERNAL_API_BASE_URL, NEXT_PUBLIC_API_BASE_URL)");
    eprintln!("  VOCAB_BIND, VOCAB_SECURE_COOKIES, VOCAB_API_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

/// Apply command-line overrides on top of the environment.
fn parse_flags(
    mut config: AppConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<AppConfig, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api" => {
                let value = require_value(args, "--api")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidApiUrl { raw: value });
                }
                config.api_base_url = value.trim().to_string();
            }
            "--bind" => {
                let value = require_value(args, "--bind")?;
                config.bind =
                    parse_bind(&value).map_err(|_| ArgsError::InvalidBind { raw: value.clone() })?;
            }
            "--secure-cookies" => config.secure_cookies = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,app=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> anyhow::Result<()> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means serve.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => match Command::from_arg(first) {
            Some(cmd) => cmd,
            None => {
                print_usage();
                anyhow::bail!("unknown subcommand: {first}");
            }
        },
    };
    if argv.first().is_some_and(|first| !first.starts_with("--")) {
        argv.remove(0);
    }

    let config = AppConfig::from_env().context("reading configuration from the environment")?;
    let config = parse_flags(config, &mut argv.into_iter()).inspect_err(|_| print_usage())?;

    match cmd {
        Command::Check => {
            println!("api:            {}", config.api_base_url);
            println!("bind:           {}", config.bind);
            println!("secure cookies: {}", config.secure_cookies);
            println!("api timeout:    {}s", config.api_timeout.as_secs());
            Ok(())
        }
        Command::Serve => {
            init_tracing();
            let state = AppState::new(&config).context("building the API client")?;
            let listener = TcpListener::bind(config.bind)
                .await
                .with_context(|| format!("binding {}", config.bind))?;
            tracing::info!(addr = %config.bind, api = %config.api_base_url, "vocab console listening");
            axum::serve(listener, create_router(state))
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("serving HTTP")?;
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
