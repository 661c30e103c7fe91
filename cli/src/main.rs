//! CLI entrypoint for tool-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection and serves the HTTP surface until Ctrl-C.

use anyhow::{Context, Result, bail};
use clap::Parser;
use relay_application::{
    CompletionBackend, NoRelayLogger, ProbeBackendUseCase, RelayLogger, RelayMessageUseCase,
};
use relay_infrastructure::{
    ConfigLoader, FileConfig, JsonlRelayLogger, OpenAiBackend, OpenAiBackendConfig, Severity,
};
use relay_presentation::{AppState, Cli, ServiceInfo, router};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Headroom between the relay timeout and the HTTP client's own timeout,
/// so the relay's timeout is the one that fires.
const CLIENT_TIMEOUT_HEADROOM: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!();
        println!("{}", toml::to_string_pretty(&redacted(&config))?);
        return Ok(());
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(cli.verbose, &config)?;

    info!("Starting tool-relay v{}", env!("CARGO_PKG_VERSION"));

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("Config error: {}", issue.message),
            Severity::Warning => warn!("Config: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Configuration is invalid; see the errors above");
    }

    // === Dependency Injection ===
    let params = config.relay_params();
    let backend_key = config.backend.resolve_api_key();
    let backend: Arc<dyn CompletionBackend> = Arc::new(
        OpenAiBackend::new(OpenAiBackendConfig {
            base_url: config.backend.base_url.clone(),
            api_key: backend_key.clone(),
            api_version: config.backend.api_version.clone(),
            timeout: params.request_timeout + CLIENT_TIMEOUT_HEADROOM,
        })
        .context("Failed to build the backend HTTP client")?,
    );

    let event_logger: Arc<dyn RelayLogger> = match &config.logging.event_log {
        Some(path) => match JsonlRelayLogger::new(path) {
            Some(logger) => {
                info!("Writing relay events to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoRelayLogger),
        },
        None => Arc::new(NoRelayLogger),
    };

    let relay = RelayMessageUseCase::new(backend.clone(), &params).with_logger(event_logger);
    let (relay, web_search_enabled) = attach_web_search(relay, &config)?;
    let probe = ProbeBackendUseCase::new(backend, &params);

    let info = ServiceInfo {
        backend_base_url: config.backend.base_url.clone(),
        backend_api_key_configured: backend_key.is_some(),
        models: params.models.clone(),
        max_tokens_limit: params.max_tokens_limit,
        request_timeout_secs: params.request_timeout.as_secs(),
        web_search_enabled,
    };
    let state = AppState::new(relay, probe, info)
        .with_client_api_key(config.auth.resolve_api_key());
    if state.client_auth_enabled() {
        info!("Client API key validation enabled");
    }
    let app = router(Arc::new(state));

    // === Serve ===
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(
        "Listening on {} (backend: {}, models: {} / {} / {})",
        address,
        config.backend.base_url,
        params.models.big_model,
        params.models.middle_model,
        params.models.small_model
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => warn!("Could not listen for Ctrl-C: {}", e),
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP server failed")?;

    info!("tool-relay stopped");
    Ok(())
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.log_file.is_some() {
        config.logging.log_file = cli.log_file.clone();
    }
    if cli.event_log.is_some() {
        config.logging.event_log = cli.event_log.clone();
    }
}

/// Stderr output filtered by `-v` (or `RUST_LOG` when no `-v` is given),
/// plus an optional daily-rotated log file.
fn init_tracing(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.logging.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Failed to create {}", directory.display()))?;
            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

#[cfg(feature = "web-search")]
fn attach_web_search(
    relay: RelayMessageUseCase,
    config: &FileConfig,
) -> Result<(RelayMessageUseCase, bool)> {
    use relay_application::WebSearchInterceptor;
    use relay_infrastructure::ExaSearchAdapter;

    let settings = &config.web_search;
    let Some(key) = settings.resolve_api_key().filter(|_| settings.enabled) else {
        return Ok((relay, false));
    };
    let adapter = ExaSearchAdapter::new(
        settings.base_url.clone(),
        key,
        settings.num_results,
        settings.timeout(),
    )
    .context("Failed to build the web search HTTP client")?;
    info!("WebSearch interception enabled ({})", settings.base_url);
    Ok((
        relay.with_web_search(WebSearchInterceptor::new(Arc::new(adapter))),
        true,
    ))
}

#[cfg(not(feature = "web-search"))]
fn attach_web_search(
    relay: RelayMessageUseCase,
    _config: &FileConfig,
) -> Result<(RelayMessageUseCase, bool)> {
    Ok((relay, false))
}

/// Copy of `config` with inline secrets masked, for `--show-config`.
fn redacted(config: &FileConfig) -> FileConfig {
    let mask = |secret: &mut Option<String>| {
        if secret.is_some() {
            *secret = Some("********".to_string());
        }
    };
    let mut shown = config.clone();
    mask(&mut shown.backend.api_key);
    mask(&mut shown.auth.api_key);
    mask(&mut shown.web_search.api_key);
    shown
}
