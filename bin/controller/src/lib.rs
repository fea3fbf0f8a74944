pub mod config;
pub mod controller;
pub mod form;
pub mod metrics;
pub mod notification;
pub mod session;
pub mod terminal;
pub mod view;

use ::config::FrontendConfig;
use client::{create_backend, HttpBackend};
use controller::FormController;
use std::time::Duration;
use tracing::info;
use view::Renderer;

/// Connect a controller to the backend at `backend_url`.
pub fn build_controller<R: Renderer>(
    backend_url: &str,
    frontend: FrontendConfig,
    renderer: R,
) -> eyre::Result<FormController<HttpBackend, R>> {
    let backend = create_backend(
        backend_url,
        frontend.endpoints.clone(),
        Duration::from_secs(frontend.request_timeout_secs),
    )?;

    info!(
        backend = %backend.base_url(),
        profile = ?frontend.profile,
        wire_format = ?frontend.wire_format,
        "Payout controller ready"
    );

    Ok(FormController::new(frontend, backend, renderer))
}

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
