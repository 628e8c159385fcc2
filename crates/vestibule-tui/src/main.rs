//! Vestibule TUI entry point.

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vestibule_auth::{HttpSessionClient, SessionCache};
use vestibule_tui::{LocalProvider, Runtime};

/// Vestibule terminal client
#[derive(Parser, Debug)]
#[command(name = "vestibule")]
#[command(about = "Terminal shell gating screens on an identity-provider session")]
#[command(version)]
struct Args {
    /// Identity provider base URL (enables hosted mode)
    ///
    /// If not provided, runs against an in-process provider that keeps
    /// accounts in memory for the lifetime of the process.
    #[arg(short, long)]
    url: Option<String>,

    /// Publishable API key for the identity provider
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file
    ///
    /// Logging is disabled without it; stdout belongs to the TUI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let _log_guard = match &args.log_file {
        Some(path) => Some(init_logging(path, &args.log_level)?),
        None => None,
    };

    match args.url {
        Some(url) => {
            let anon_key =
                args.anon_key.ok_or("--anon-key (or SUPABASE_ANON_KEY) is required with --url")?;
            let cache = SessionCache::default_path()
                .map_or_else(|| SessionCache::new(std::env::temp_dir().join("vestibule-session.json")), SessionCache::new);
            let client = HttpSessionClient::new(url, anon_key, cache);
            Runtime::new(Arc::new(client))?.run().await?;
        },
        None => {
            Runtime::new(Arc::new(LocalProvider::new()))?.run().await?;
        },
    }

    Ok(())
}

/// Install a file-backed subscriber; the returned guard flushes on drop.
fn init_logging(
    path: &std::path::Path,
    level: &str,
) -> Result<tracing_appender::non_blocking::WorkerGuard, Box<dyn std::error::Error>> {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Ok(guard)
}
