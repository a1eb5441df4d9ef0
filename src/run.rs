//! Command execution.
//!
//! Builds the API client from the validated configuration, runs one
//! subcommand against the broker, and cancels pending retries when a
//! shutdown signal arrives.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::signal;

use emqx_admin::api::{Client, ClientError, ExProtoGateway, Gateway, Hook};
use emqx_admin::cancel::CancellationToken;
use emqx_admin::config::{
    Command, ConfigError, GatewayCommand, HookCommand, ValidatedConfig, defaults,
};
use emqx_admin::time::Sleeper;
use emqx_admin::transport::{HttpClient, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The client could not be built from the configuration.
    #[error("Failed to create client: {0}")]
    Client(#[from] ConfigError),

    /// The HTTP client could not be initialized.
    #[error("Failed to initialize HTTP client: {0}")]
    Http(#[source] reqwest::Error),

    /// A record file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadRecord {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record file is not valid JSON for the expected record.
    #[error("Invalid record in {}: {source}", path.display())]
    ParseRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A fetched record could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    /// The broker operation failed.
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// Runs `command` against the broker described by `config`.
///
/// # Errors
///
/// Returns an error if the client cannot be created, a record file is
/// unreadable, or the broker operation fails.
///
/// # Coverage Note
///
/// Excluded from coverage because it needs a live broker and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let http = ReqwestClient::with_timeout(defaults::request_timeout()).map_err(RunError::Http)?;
    let client = Client::new(config.client, http)?;
    tracing::debug!(base_url = %client.base_url(), "Client ready");

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_shutdown(cancel.clone()));

    let result = dispatch(&client, &cancel, &command).await;
    watcher.abort();

    if let Some(output) = result? {
        println!("{output}");
    }
    Ok(())
}

/// Runs one subcommand and returns the text to print, if any.
async fn dispatch<H: HttpClient, S: Sleeper>(
    client: &Client<H, S>,
    cancel: &CancellationToken,
    command: &Command,
) -> Result<Option<String>, RunError> {
    match command {
        // Handled before a client exists.
        Command::Init { .. } => Ok(None),
        Command::Hook(HookCommand::Get { name }) => {
            let hook = client.hook_get(cancel, name).await?;
            serde_json::to_string_pretty(&hook)
                .map(Some)
                .map_err(RunError::Render)
        }
        Command::Hook(HookCommand::Create { file }) => {
            let hook: Hook = read_record(file)?;
            client.hook_create(cancel, &hook).await?;
            Ok(None)
        }
        Command::Hook(HookCommand::Update { file }) => {
            let hook: Hook = read_record(file)?;
            client.hook_update(cancel, &hook).await?;
            Ok(None)
        }
        Command::Gateway(GatewayCommand::Update { file }) => {
            let gateway: ExProtoGateway = read_record(file)?;
            client.gateway_update(cancel, &Gateway::from(gateway)).await?;
            Ok(None)
        }
    }
}

/// Reads a JSON record from `path`.
fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, RunError> {
    let bytes = std::fs::read(path).map_err(|source| RunError::ReadRecord {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| RunError::ParseRecord {
        path: path.to_path_buf(),
        source,
    })
}

/// Cancels `cancel` once a shutdown signal is received.
#[cfg(not(tarpaulin_include))]
async fn cancel_on_shutdown(cancel: CancellationToken) {
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, abandoning retries");
    cancel.cancel();
}

/// Waits for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed, that source never fires.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
