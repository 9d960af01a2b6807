//! crates/mslog/src/thread_local.rs
//! Default channel configuration used when no explicit configuration is passed.
//!
//! The default instance lives in thread-local storage and is created on first
//! use with the built-in stdout/stderr sinks and buffering disabled. Each
//! thread therefore configures, fills and drains its own default; there is no
//! teardown requirement.
//!
//! Sinks are always invoked after the thread-local borrow has been released,
//! so a sink may itself log through these functions.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use mslog_sink::{StderrSink, StdoutSink};

use super::channel::{deliver_all, Applied, ChannelConfig};
use super::config::LogSettings;
use super::error::{ConfigError, PopError};
use super::levels::LogLevel;
use super::registry::LogEntry;

thread_local! {
    static DEFAULT: RefCell<ChannelConfig> = RefCell::new(ChannelConfig::new());
}

/// Runs `f` with exclusive access to the current thread's default
/// configuration.
///
/// # Panics
///
/// Panics if `f` calls back into any of this crate's free functions, or if a
/// sink invoked from inside `f` does.
pub fn with_default<R>(f: impl FnOnce(&mut ChannelConfig) -> R) -> R {
    DEFAULT.with(|config| f(&mut config.borrow_mut()))
}

/// Replaces the default configuration with a fresh one, dropping any
/// buffered messages.
pub fn reset() {
    DEFAULT.with(|config| {
        drop(config.replace(ChannelConfig::new()));
    });
}

/// Reconfigures the default instance; see [`ChannelConfig::configure`].
pub fn configure(settings: LogSettings) -> Result<(), ConfigError> {
    let Applied { result, reports } = DEFAULT.with(|config| config.borrow_mut().apply(settings));
    deliver_all(reports);
    result
}

/// Reconfigures the default instance with buffering forced off.
pub fn loginit(settings: LogSettings) -> Result<(), ConfigError> {
    configure(settings.max_messages(0))
}

/// Sets the default instance up for error capture.
///
/// The built-in sinks are reinstalled, `None` prefixes keep their current
/// value, and up to `max_messages` warnings and errors are buffered for
/// [`drain_messages`].
///
/// ```
/// mslog::capture_errors(None, Some("[mseed] "), mslog::DEFAULT_MAX_MESSAGES)?;
///
/// mslog::log(2, "first failure");
/// mslog::log(2, "second failure");
///
/// assert_eq!(
///     mslog::drain_messages(),
///     ["[mseed] second failure", "[mseed] first failure"]
/// );
/// # Ok::<(), mslog::ConfigError>(())
/// ```
pub fn capture_errors(
    log_prefix: Option<&str>,
    error_prefix: Option<&str>,
    max_messages: usize,
) -> Result<(), ConfigError> {
    let mut settings = LogSettings::buffered(max_messages)
        .shared_log_sink(Arc::new(StdoutSink::default()))
        .shared_diag_sink(Arc::new(StderrSink::default()));
    if let Some(prefix) = log_prefix {
        settings = settings.log_prefix(prefix);
    }
    if let Some(prefix) = error_prefix {
        settings = settings.diag_prefix(prefix);
    }
    configure(settings)
}

/// Logs `message` at `level` through the default instance.
pub fn log(level: impl Into<LogLevel>, message: &str) {
    log_from(level, None, message);
}

/// Logs `message` through the default instance and records its origin.
pub fn log_from(level: impl Into<LogLevel>, origin: Option<&'static str>, message: &str) {
    let level = level.into();
    let delivery = DEFAULT.with(|config| config.borrow_mut().route(level, origin, message));
    if let Some(delivery) = delivery {
        delivery.deliver();
    }
}

/// Logs pre-formatted arguments; used by [`rlog!`](crate::rlog).
pub fn log_fmt(level: impl Into<LogLevel>, origin: Option<&'static str>, args: fmt::Arguments<'_>) {
    match args.as_str() {
        Some(message) => log_from(level, origin, message),
        None => log_from(level, origin, &args.to_string()),
    }
}

/// Emits up to `count` buffered messages (`0` for all) from the default
/// instance; see [`ChannelConfig::rlog_emit`].
pub fn rlog_emit(count: usize, context: bool) -> usize {
    let deliveries = DEFAULT.with(|config| config.borrow_mut().take_emissions(count, context));
    let emitted = deliveries.len();
    deliver_all(deliveries);
    emitted
}

/// Pops the most recent message of the default instance into `buffer`; see
/// [`ChannelConfig::rlog_pop`].
pub fn rlog_pop(buffer: Option<&mut [u8]>, context: bool) -> Result<usize, PopError> {
    DEFAULT.with(|config| config.borrow_mut().rlog_pop(buffer, context))
}

/// Discards every message buffered by the default instance.
pub fn rlog_free() -> usize {
    DEFAULT.with(|config| config.borrow_mut().rlog_free())
}

/// Removes and returns the most recent message of the default instance.
pub fn pop_message() -> Option<LogEntry> {
    DEFAULT.with(|config| config.borrow_mut().pop_message())
}

/// Pops every message of the default instance, newest first.
pub fn drain_messages() -> Vec<String> {
    DEFAULT.with(|config| config.borrow_mut().drain_messages())
}

/// Number of messages buffered by the default instance.
pub fn message_count() -> usize {
    DEFAULT.with(|config| config.borrow().message_count())
}

/// Registry capacity of the default instance.
pub fn max_messages() -> usize {
    DEFAULT.with(|config| config.borrow().max_messages())
}
