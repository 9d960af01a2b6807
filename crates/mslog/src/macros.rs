//! crates/mslog/src/macros.rs
//! Formatting macros that record the calling module as the message origin.

/// Logs a formatted message through the thread's default configuration.
///
/// The first argument is the level (a [`LogLevel`](crate::LogLevel) or a raw
/// integer); the rest is a [`format!`] string and its arguments. The calling
/// module path is recorded as the message origin and shows up when buffered
/// messages are emitted or popped with context.
///
/// ```
/// use mslog::{rlog, LogSettings};
///
/// mslog::configure(LogSettings::buffered(4).diag_sink(|_: &str| {}))?;
/// rlog!(2, "record {} has {} samples, expected {}", "XX.TEST..BHZ", 98, 100);
///
/// let entry = mslog::pop_message().unwrap();
/// assert_eq!(entry.text(), "Error: record XX.TEST..BHZ has 98 samples, expected 100");
/// assert_eq!(entry.origin(), Some(module_path!()));
/// # Ok::<(), mslog::ConfigError>(())
/// ```
#[macro_export]
macro_rules! rlog {
    ($level:expr, $($arg:tt)+) => {
        $crate::log_fmt($level, ::core::option::Option::Some(::core::module_path!()), ::core::format_args!($($arg)+))
    };
}

/// Logs a formatted message through an explicit [`ChannelConfig`](crate::ChannelConfig).
///
/// ```
/// use mslog::{rlog_to, ChannelConfig, LogLevel, LogSettings};
/// use mslog_sink::CollectingSink;
///
/// let errors = CollectingSink::new();
/// let mut config = ChannelConfig::from_settings(LogSettings::new().diag_sink(errors.clone()))?;
///
/// rlog_to!(config, LogLevel::Warning, "gap of {:.3} seconds", 1.5);
/// assert_eq!(errors.lines(), ["Warning: gap of 1.500 seconds"]);
/// # Ok::<(), mslog::ConfigError>(())
/// ```
#[macro_export]
macro_rules! rlog_to {
    ($config:expr, $level:expr, $($arg:tt)+) => {
        $config.log_fmt($level, ::core::option::Option::Some(::core::module_path!()), ::core::format_args!($($arg)+))
    };
}
