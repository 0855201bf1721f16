//! pplx-gui - Local browser GUI for Perplexity AI.

use anyhow::Context;
use clap::Parser;
use pplx_chat::browser::open_browser;
use pplx_chat::config::{Config, LogVerbosity};
use pplx_chat::gui::{create_router_with_timeouts, AppState};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pplx-gui")]
#[command(about = "Local browser GUI for Perplexity AI")]
#[command(version)]
struct Cli {
    /// Port to listen on (0 picks a free port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Only print the URL, do not launch a browser
    #[arg(long)]
    no_browser: bool,

    /// Startup banner verbosity
    #[arg(short, long, value_enum)]
    log_level: Option<LogLevel>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogLevel {
    Minimal,
    Compact,
    Verbose,
}

impl From<LogLevel> for LogVerbosity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Minimal => LogVerbosity::Minimal,
            LogLevel::Compact => LogVerbosity::Compact,
            LogLevel::Verbose => LogVerbosity::Verbose,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    match run_server(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run_server(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut config = config.with_env_overrides();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    let verbosity = cli
        .log_level
        .map(LogVerbosity::from)
        .unwrap_or(config.server.log_verbosity);

    let state = AppState::from_config(&config)?;
    let app = create_router_with_timeouts(
        state,
        Duration::from_secs(config.server.read_timeout_secs),
        Duration::from_secs(config.server.write_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("bind {}:{}", config.server.host, config.server.port))?;
    let addr = listener.local_addr()?;
    let url = format!("http://{}", addr);

    match verbosity {
        LogVerbosity::Minimal => println!("{}", url),
        LogVerbosity::Compact => println!("→ Perplexity GUI: {}", url),
        LogVerbosity::Verbose => {
            println!("────────────────────────────────────────");
            println!("pplx-gui v{}", env!("CARGO_PKG_VERSION"));
            println!("────────────────────────────────────────");
            println!("GUI:        {}", url);
            println!("Chat API:   {}/api/chat", url);
            println!("Upstream:   {}", config.api.endpoint);
            println!("Model:      {} (default)", config.api.default_model);
            println!("────────────────────────────────────────");
        }
    }
    tracing::info!("Perplexity GUI listening on {}", url);

    if config.server.open_browser && !cli.no_browser {
        if let Err(err) = open_browser(&url) {
            tracing::debug!("could not open browser: {}", err);
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server stopped")?;

    println!("\nGUI stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!("Ctrl+C handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!("SIGTERM handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
