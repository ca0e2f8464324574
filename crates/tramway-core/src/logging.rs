//! Logging integration for the tramway routing engine.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-resolution
//! spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter directive is read from `settings.log_level` (e.g. "debug",
/// "info", "tramway_routing=trace"). In debug mode a pretty, human-readable
/// format is used; in production a structured JSON format is used.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one route resolution.
///
/// Attach this span around a `resolve` call so that log entries emitted
/// while matching carry the method and path being resolved.
///
/// # Examples
///
/// ```
/// use tramway_core::logging::resolve_span;
///
/// let span = resolve_span("GET", "/user/42");
/// let _guard = span.enter();
/// tracing::debug!("resolving request");
/// ```
pub fn resolve_span(method: &str, path: &str) -> tracing::Span {
    tracing::debug_span!("resolve", method = method, path = path)
}
