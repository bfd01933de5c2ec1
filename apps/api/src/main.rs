//! Doc-host API composition root.
//!
//! Serves the upload, submit and login endpoints, appending one JSON line
//! per handled request to the event log.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod form_fields;
mod handlers;
mod request_context;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use dochost_core::AppError;
use dochost_infrastructure::{FilesystemUploadStore, JsonLinesEventLog};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let event_log = Arc::new(JsonLinesEventLog::open(&config.event_log_path).await?);
    let upload_store = Arc::new(FilesystemUploadStore::open(&config.upload_dir).await?);

    let app_state = AppState::new(
        config.credential.clone(),
        event_log.clone(),
        upload_store,
        config.trust_forwarded_for,
    );
    let app = build_router(app_state, config.max_upload_bytes);

    let address = config.socket_address()?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        upload_dir = %config.upload_dir.display(),
        event_log = %config.event_log_path.display(),
        "dochost-api listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|error| AppError::Internal(format!("api server error: {error}")))?;

    event_log.close().await?;
    info!("dochost-api stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(error) => {
                warn!(%error, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(error) => {
                warn!(%error, "failed to install terminate handler");
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
}
