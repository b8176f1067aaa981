use clap::{Parser, Subcommand};
use ps_db::{DbError, DbPool};
use ps_relay::{HttpCompletionClient, Relay};
use ps_serve::{AppState, ConfigError, ServerConfig};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::signal;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "pyscribe", about = "English-to-Python translation relay")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve,
    /// Print the OpenAPI document.
    Openapi,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open document store: {0}")]
    Store(#[from] DbError),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve => {
            init_tracing();
            match serve().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    tracing::error!(error = %err, "pyscribe failed");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Openapi => {
            println!("{}", ps_serve::openapi::generate_spec());
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pyscribe=debug,ps_serve=debug,ps_relay=debug".into()),
        )
        .with_target(false)
        .with_line_number(true)
        .init();
}

async fn serve() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let pool = DbPool::open(&config.database_url, &config.db_name)?;
    let http = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;
    let client = HttpCompletionClient::new(http, config.upstream());
    tracing::info!(
        endpoint = %client.endpoint(),
        model = %config.model,
        timeout_secs = config.timeout.as_secs(),
        "upstream configured"
    );
    let relay = Relay::new(Arc::new(client), config.relay_settings());

    let state = AppState::new(pool.clone(), relay);
    let served = ps_serve::serve(state, config.addr(), shutdown_signal()).await;
    if let Err(err) = pool.close() {
        tracing::warn!(error = %err, "closing document store failed");
    }
    served?;
    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
