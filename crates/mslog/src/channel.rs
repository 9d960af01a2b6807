//! crates/mslog/src/channel.rs
//! Channel configuration: sinks, prefixes, routing and registry access.

use std::fmt;
use std::sync::Arc;

use mslog_sink::{SharedSink, StderrSink, StdoutSink};

use super::config::{BufferPolicy, DiagPrefix, LogSettings, MAX_LOG_MSG_LENGTH};
use super::error::{ConfigError, PopError};
use super::levels::{Channel, LogLevel};
use super::registry::{LogEntry, MessageRegistry};
use super::trace;

/// Text bound for a sink, produced while the configuration is borrowed and
/// delivered afterwards.
pub(crate) struct Delivery {
    sink: SharedSink,
    text: String,
}

impl Delivery {
    pub(crate) fn deliver(self) {
        self.sink.accept(&self.text);
    }
}

pub(crate) fn deliver_all(deliveries: Vec<Delivery>) {
    for delivery in deliveries {
        delivery.deliver();
    }
}

/// Outcome of applying settings before any sink has been called.
pub(crate) struct Applied {
    pub(crate) result: Result<(), ConfigError>,
    pub(crate) reports: Vec<Delivery>,
}

/// One log-parameter block: a sink and a prefix per channel plus the message
/// registry.
///
/// Informational messages go to the log channel, warnings and errors to the
/// diagnostic channel. While the registry is enabled, messages selected by
/// the [`BufferPolicy`] are stored instead of being sent, and are later
/// drained with [`rlog_emit`](Self::rlog_emit), [`rlog_pop`](Self::rlog_pop)
/// or [`rlog_free`](Self::rlog_free).
///
/// The configuration performs no locking. Share it between threads only under
/// external synchronisation; components sharing one configuration also share
/// its capacity and eviction.
///
/// # Examples
///
/// ```
/// use mslog::{ChannelConfig, LogSettings};
/// use mslog_sink::CollectingSink;
///
/// let errors = CollectingSink::new();
/// let mut config = ChannelConfig::from_settings(
///     LogSettings::buffered(10).diag_sink(errors.clone()),
/// )?;
///
/// config.log(1, "Warning 1");
/// config.log(2, "Error 1");
/// assert!(errors.is_empty());
///
/// assert_eq!(config.rlog_emit(0, false), 2);
/// assert_eq!(errors.take(), ["Warning: Warning 1", "Error: Error 1"]);
/// assert_eq!(config.message_count(), 0);
/// # Ok::<(), mslog::ConfigError>(())
/// ```
pub struct ChannelConfig {
    log_sink: SharedSink,
    log_prefix: String,
    diag_sink: SharedSink,
    diag_prefix: DiagPrefix,
    policy: BufferPolicy,
    registry: MessageRegistry,
}

impl ChannelConfig {
    /// A configuration with the built-in sinks (stdout and stderr), empty log
    /// prefix, default diagnostic prefix and buffering disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_sink: Arc::new(StdoutSink::default()),
            log_prefix: String::new(),
            diag_sink: Arc::new(StderrSink::default()),
            diag_prefix: DiagPrefix::Default,
            policy: BufferPolicy::default(),
            registry: MessageRegistry::new(),
        }
    }

    /// Builds a fresh configuration from `settings`.
    ///
    /// Unset fields take the built-in defaults. A rejected prefix is reported
    /// through the diagnostic sink and leaves the default in place; only a
    /// registry allocation failure makes construction fail.
    pub fn from_settings(settings: LogSettings) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        match config.configure(settings) {
            Err(error) if !error.is_rejection() => Err(error),
            _ => Ok(config),
        }
    }

    /// Reconfigures the block.
    ///
    /// Sinks are resolved first, so a prefix rejection is reported through the
    /// sink installed by this very call. Each rejected prefix keeps its
    /// previous value while the remaining fields still take effect; the first
    /// rejection is returned. The registry takes the new capacity and any
    /// buffered messages are discarded without emission. Registry storage
    /// grows on demand, so any capacity is accepted.
    ///
    /// Only if the small initial reservation fails is
    /// [`ConfigError::Allocation`] returned, and then nothing is modified.
    pub fn configure(&mut self, settings: LogSettings) -> Result<(), ConfigError> {
        let Applied { result, reports } = self.apply(settings);
        deliver_all(reports);
        result
    }

    /// Reconfigures the block with buffering forced off.
    pub fn loginit(&mut self, settings: LogSettings) -> Result<(), ConfigError> {
        self.configure(settings.max_messages(0))
    }

    pub(crate) fn apply(&mut self, settings: LogSettings) -> Applied {
        let LogSettings {
            log_sink,
            log_prefix,
            diag_sink,
            diag_prefix,
            max_messages,
            policy,
        } = settings;

        let registry = match MessageRegistry::with_capacity(max_messages) {
            Ok(registry) => registry,
            Err(source) => {
                return Applied {
                    result: Err(ConfigError::Allocation {
                        requested: max_messages,
                        source,
                    }),
                    reports: Vec::new(),
                };
            }
        };

        if let Some(sink) = log_sink {
            self.log_sink = sink;
        }
        if let Some(sink) = diag_sink {
            self.diag_sink = sink;
        }

        let mut rejection = None;
        let mut reports = Vec::new();

        if let Some(prefix) = log_prefix {
            if prefix.len() > MAX_LOG_MSG_LENGTH {
                trace::trace_prefix_rejected("log_prefix", prefix.len());
                let error = ConfigError::LogPrefixTooLarge {
                    length: prefix.len(),
                };
                reports.push(self.rejection_report(&error));
                rejection.get_or_insert(error);
            } else {
                self.log_prefix = prefix;
            }
        }

        if let Some(prefix) = diag_prefix {
            if prefix.len() > MAX_LOG_MSG_LENGTH {
                trace::trace_prefix_rejected("diag_prefix", prefix.len());
                let error = ConfigError::DiagPrefixTooLarge {
                    length: prefix.len(),
                };
                reports.push(self.rejection_report(&error));
                rejection.get_or_insert(error);
            } else {
                self.diag_prefix = DiagPrefix::custom(prefix);
            }
        }

        if let Some(policy) = policy {
            self.policy = policy;
        }

        let discarded = self.registry.len();
        self.registry = registry;
        trace::trace_configured(max_messages, discarded);

        Applied {
            result: rejection.map_or(Ok(()), Err),
            reports,
        }
    }

    fn rejection_report(&self, error: &ConfigError) -> Delivery {
        Delivery {
            sink: Arc::clone(&self.diag_sink),
            text: self.format(LogLevel::Error, &error.to_string()),
        }
    }

    // ========================================================================
    // Logging
    // ========================================================================

    /// Logs `message` at `level`.
    ///
    /// `level` accepts a [`LogLevel`] or a raw integer (`0` informational,
    /// `1` warning, `>= 2` error). The body is truncated to
    /// [`MAX_LOG_MSG_LENGTH`] bytes before the channel prefix is applied.
    pub fn log(&mut self, level: impl Into<LogLevel>, message: &str) {
        self.log_from(level, None, message);
    }

    /// Logs `message` and records the code location it came from.
    pub fn log_from(
        &mut self,
        level: impl Into<LogLevel>,
        origin: Option<&'static str>,
        message: &str,
    ) {
        if let Some(delivery) = self.route(level.into(), origin, message) {
            delivery.deliver();
        }
    }

    /// Logs pre-formatted arguments; used by [`rlog_to!`](crate::rlog_to).
    pub fn log_fmt(
        &mut self,
        level: impl Into<LogLevel>,
        origin: Option<&'static str>,
        args: fmt::Arguments<'_>,
    ) {
        match args.as_str() {
            Some(message) => self.log_from(level, origin, message),
            None => self.log_from(level, origin, &args.to_string()),
        }
    }

    /// Formats the message and either buffers it or hands it back for
    /// immediate delivery.
    pub(crate) fn route(
        &mut self,
        level: LogLevel,
        origin: Option<&'static str>,
        message: &str,
    ) -> Option<Delivery> {
        let text = self.format(level, message);

        if self.registry.is_enabled() && self.policy.buffers(level) {
            let evicted = self.registry.push(LogEntry::new(level, origin, text));
            if evicted > 0 {
                trace::trace_evicted(evicted, self.registry.capacity());
            }
            return None;
        }

        Some(Delivery {
            sink: Arc::clone(self.sink_for(level)),
            text,
        })
    }

    /// Applies the channel prefix to the truncated body.
    pub(crate) fn format(&self, level: LogLevel, message: &str) -> String {
        let prefix = match level.channel() {
            Channel::Log => self.log_prefix.as_str(),
            Channel::Diagnostic => self.diag_prefix.for_level(level),
        };
        let body = truncate_to_boundary(message, MAX_LOG_MSG_LENGTH);

        let mut text = String::with_capacity(prefix.len() + body.len());
        text.push_str(prefix);
        text.push_str(body);
        text
    }

    fn sink_for(&self, level: LogLevel) -> &SharedSink {
        match level.channel() {
            Channel::Log => &self.log_sink,
            Channel::Diagnostic => &self.diag_sink,
        }
    }

    // ========================================================================
    // Registry retrieval
    // ========================================================================

    /// Sends up to `count` buffered messages (`0` for all) through their
    /// channel sinks, oldest first, and removes them from the registry.
    ///
    /// With `context`, each line is preceded by its recorded origin. Returns
    /// the number of messages emitted.
    pub fn rlog_emit(&mut self, count: usize, context: bool) -> usize {
        let deliveries = self.take_emissions(count, context);
        let emitted = deliveries.len();
        deliver_all(deliveries);
        emitted
    }

    pub(crate) fn take_emissions(&mut self, count: usize, context: bool) -> Vec<Delivery> {
        let entries = self.registry.take_oldest(count);
        if !entries.is_empty() {
            trace::trace_drained("emit", entries.len(), self.registry.len());
        }

        entries
            .into_iter()
            .map(|entry| Delivery {
                sink: Arc::clone(self.sink_for(entry.level())),
                text: entry.render(context).into_owned(),
            })
            .collect()
    }

    /// Removes the most recent message and copies its text into `buffer`.
    ///
    /// The text is truncated on a character boundary to fit. Returns the
    /// number of bytes copied, or `Ok(0)` when the registry is empty. An
    /// absent or zero-length buffer is rejected without touching the registry.
    ///
    /// ```
    /// use mslog::{ChannelConfig, LogSettings, PopError};
    ///
    /// let mut config = ChannelConfig::from_settings(LogSettings::buffered(4))?;
    /// config.log(2, "First error");
    /// config.log(2, "Second error");
    ///
    /// let mut buffer = [0u8; 64];
    /// let length = config.rlog_pop(Some(&mut buffer), false).unwrap();
    /// assert_eq!(&buffer[..length], b"Error: Second error");
    ///
    /// assert_eq!(config.rlog_pop(None, false), Err(PopError::MissingBuffer));
    /// assert_eq!(config.message_count(), 1);
    /// # Ok::<(), mslog::ConfigError>(())
    /// ```
    pub fn rlog_pop(&mut self, buffer: Option<&mut [u8]>, context: bool) -> Result<usize, PopError> {
        let buffer = buffer.ok_or(PopError::MissingBuffer)?;
        if buffer.is_empty() {
            return Err(PopError::EmptyBuffer);
        }

        let Some(entry) = self.pop_message() else {
            return Ok(0);
        };

        let rendered = entry.render(context);
        let copied = truncate_to_boundary(&rendered, buffer.len());
        buffer[..copied.len()].copy_from_slice(copied.as_bytes());
        Ok(copied.len())
    }

    /// Removes and returns the most recent message.
    pub fn pop_message(&mut self) -> Option<LogEntry> {
        let entry = self.registry.pop_newest()?;
        trace::trace_drained("pop", 1, self.registry.len());
        Some(entry)
    }

    /// Pops every buffered message, newest first, with trailing newlines
    /// stripped.
    ///
    /// This is the retrieval hosts use to attach captured library errors to
    /// their own error values.
    pub fn drain_messages(&mut self) -> Vec<String> {
        let mut messages = Vec::with_capacity(self.registry.len());
        while let Some(entry) = self.pop_message() {
            let mut text = entry.into_text();
            let trimmed = text.trim_end_matches('\n').len();
            text.truncate(trimmed);
            messages.push(text);
        }
        messages
    }

    /// Discards every buffered message without sending it anywhere and
    /// returns how many were discarded.
    pub fn rlog_free(&mut self) -> usize {
        let discarded = self.registry.clear();
        if discarded > 0 {
            trace::trace_drained("free", discarded, 0);
        }
        discarded
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of buffered messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.registry.len()
    }

    /// Registry capacity; `0` means buffering is disabled.
    #[must_use]
    pub const fn max_messages(&self) -> usize {
        self.registry.capacity()
    }

    /// Read-only view of the registry.
    #[must_use]
    pub const fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    /// Iterates over buffered messages, oldest first.
    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.registry.iter()
    }

    /// Prefix of the informational channel.
    #[must_use]
    pub fn log_prefix(&self) -> &str {
        &self.log_prefix
    }

    /// Prefix of the diagnostic channel.
    #[must_use]
    pub const fn diag_prefix(&self) -> &DiagPrefix {
        &self.diag_prefix
    }

    /// Active buffering policy.
    #[must_use]
    pub const fn policy(&self) -> BufferPolicy {
        self.policy
    }

    /// Sink of the informational channel.
    #[must_use]
    pub const fn log_sink(&self) -> &SharedSink {
        &self.log_sink
    }

    /// Sink of the diagnostic channel.
    #[must_use]
    pub const fn diag_sink(&self) -> &SharedSink {
        &self.diag_sink
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("log_prefix", &self.log_prefix)
            .field("diag_prefix", &self.diag_prefix)
            .field("policy", &self.policy)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a
/// character.
pub(crate) fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }

    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
