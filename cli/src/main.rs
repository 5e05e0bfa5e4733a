//! CLI entrypoint for parley
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use parley_application::{CredentialSource, EnsureSessionUseCase, ResolveCredentialUseCase};
use parley_infrastructure::{
    ConfigLoader, EnvCredentialSource, FileConfig, GeminiLlmGateway, GeminiOptions,
    SecretsFileSource,
};
use parley_presentation::{ChatServer, Cli};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Load configuration (files, then PARLEY_* env), then apply CLI flags
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {e}"))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("invalid configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    info!("Starting parley");

    // === Dependency Injection ===
    let secrets = SecretsFileSource::discover(config.secrets.path.as_deref());
    let resolver = ResolveCredentialUseCase::new(vec![
        Arc::new(secrets) as Arc<dyn CredentialSource>,
        Arc::new(EnvCredentialSource::new()) as Arc<dyn CredentialSource>,
    ]);

    let server = match resolver.execute() {
        Ok(credential) => {
            let options = GeminiOptions::default()
                .with_base_url(config.gemini.base_url.clone())
                .with_request_timeout(config.request_timeout())
                .with_connect_timeout(config.connect_timeout());
            let gateway = Arc::new(GeminiLlmGateway::new(credential, options)?);
            let settings = config.chat_settings()?;
            info!("New conversations use {}", settings.model);

            ChatServer::new(EnsureSessionUseCase::new(gateway, settings))
        }
        Err(e) => {
            error!("{}", e);
            ChatServer::unavailable(e.to_string())
        }
    };

    server.serve(&config.server.bind_address()).await?;

    Ok(())
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(model) = &cli.model {
        config.chat.model = model.clone();
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }
}

/// Initialize logging based on `RUST_LOG`, or the verbosity level.
///
/// Logs go to stderr, and also to `log_file` when given.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(log_file_writer(path)?);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Open `path` for appending, creating its directory if needed.
fn log_file_writer(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("cannot open log file {}", path.display()))
}
