pub mod config;
pub mod models;
pub mod report; // Report composition: range parsing, status, grouping, PDF
pub mod analytics; // Dashboard statistics + activity feed
pub mod dashboard;
pub mod api;
pub mod poll;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries and integration harnesses.
/// Honors RUST_LOG, falls back to the configured default filter.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("LabAssist core starting v{}", config::APP_VERSION);
}
