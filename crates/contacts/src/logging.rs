//! Tracing subscriber setup.

use restkit::AppMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber for `mode`.
///
/// `RUST_LOG` wins over the mode's default filter. Release mode writes JSON
/// lines; the other modes use the human-readable formatter. Calling this
/// twice is a no-op.
pub fn init(mode: AppMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(mode.default_log_filter()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if mode.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if result.is_ok() {
        tracing::debug!(%mode, "Tracing initialized");
    }
}
