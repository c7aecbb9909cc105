//! Shared logging utilities for consistent tracing across the bot

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::errors::{SharedError, SharedResult};
use crate::types::TurnId;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Build the filter directive for a base log level
pub fn filter_directive(log_level: &str) -> SharedResult<String> {
    let level = log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(SharedError::InvalidLogLevel { level: log_level.to_string() });
    }
    Ok(format!("bot={level},shared={level},reqwest=warn,hyper=warn"))
}

/// Initialize the tracing subscriber.
///
/// Output goes to stderr so that stdout only ever carries bot replies.
/// `RUST_LOG`, when set, takes precedence over `log_level`.
pub fn init_tracing(log_level: &str) -> SharedResult<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let directive = filter_directive(log_level)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .map_err(|e| SharedError::TracingInit { message: e.to_string() })
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for turn-aware info logging
#[macro_export]
macro_rules! turn_info {
    ($turn_id:expr, $($arg:tt)*) => {
        tracing::info!(
            turn = %$turn_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for turn-aware warning logging
#[macro_export]
macro_rules! turn_warn {
    ($turn_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            turn = %$turn_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for turn-aware debug logging
#[macro_export]
macro_rules! turn_debug {
    ($turn_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            turn = %$turn_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = format_timestamp(), "🚀 Starting {}", details);
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(reason: &str) {
    info!(timestamp = format_timestamp(), "🛑 Shutting down: {}", reason);
}

/// Contextual logging helper for error conditions
pub fn log_error(turn_id: &TurnId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        turn = %turn_id,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}
