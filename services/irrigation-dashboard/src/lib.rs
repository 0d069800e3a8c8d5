//! Irrigation Dashboard - live sync controller for the plant irrigation dashboard
//!
//! Mirrors push-channel sensor events into display targets, keeps a bounded
//! humidity chart, sends manual and voice irrigation commands, and serves the
//! dashboard's static assets cache-first.

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod i18n;
pub mod io;
pub mod offline;
pub mod reading;
pub mod series;
pub mod session;
pub mod surface;
pub mod voice;

pub use config::{load_config, Config};
pub use controller::DashboardController;
pub use error::{DashboardError, Result};
pub use events::ChannelEvent;
pub use voice::IrrigationCommand;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

use crate::cache::{new_cache_handle, OfflineCache};
use crate::i18n::Translations;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::session::{run_session, SessionStats};
use crate::surface::ConsoleSurface;

/// Build a controller rendering to the terminal
pub fn console_controller(config: &Config) -> DashboardController<ConsoleSurface> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::default());
    let text = Translations::for_language(config.language);
    DashboardController::new(ConsoleSurface::new(text.no_image), config, http)
}

/// Run an interactive dashboard session over `input` until it ends or ctrl-c
pub async fn watch<R>(config: &Config, input: R) -> Result<SessionStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut controller = console_controller(config);
    let cancel = shutdown_token();

    // Initial load, as when the page opens
    controller.refresh_latest_image().await;

    run_session(&mut controller, input, cancel).await
}

/// Install and activate the offline asset cache, then serve it until ctrl-c
pub async fn serve_offline(config: &Config) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::default());
    let cache = OfflineCache::new(
        &config.offline_cache,
        config.server.clone(),
        new_cache_handle(),
        http,
    );

    cache.install().await?;
    let deleted = cache.activate().await;
    tracing::debug!("Activated cache '{}', removed {:?}", cache.name(), deleted);

    let cancel = shutdown_token();
    let router = offline::build_router(cache);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.offline_cache.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Offline asset cache listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::debug!("Offline asset cache stopped");
    Ok(())
}

fn shutdown_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
        }
    });
    cancel
}
