//! Logging bootstrap.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. [`init_logging`] does that once per process and never
//! panics.

use std::sync::OnceLock;

use tracing::info;
use tracing_subscriber::EnvFilter;

static ACTIVE_FILTER: OnceLock<String> = OnceLock::new();

/// Install a global fmt subscriber with the given `EnvFilter` directive.
///
/// Repeated calls with the same filter are no-ops. A different filter after
/// initialization, or a filter that does not parse, is an error.
pub fn init_logging(filter: &str) -> Result<(), String> {
    let filter = filter.trim();
    let env_filter =
        EnvFilter::try_new(filter).map_err(|err| format!("invalid log filter `{filter}`: {err}"))?;

    if let Some(active) = ACTIVE_FILTER.get() {
        if active == filter {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized with `{active}`; refusing to switch to `{filter}`"
        ));
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|err| format!("failed to install subscriber: {err}"))?;

    let _ = ACTIVE_FILTER.set(filter.to_string());
    info!(
        target: "docstore",
        version = env!("CARGO_PKG_VERSION"),
        filter,
        "logging initialized"
    );
    Ok(())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Filter installed by [`init_logging`], if any.
pub fn logging_status() -> Option<&'static str> {
    ACTIVE_FILTER.get().map(String::as_str)
}
