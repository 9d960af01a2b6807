//! crates/mslog/src/config.rs
//! Channel settings: limits, prefixes, buffering policy and sink selection.

use std::fmt;
use std::sync::Arc;

use mslog_sink::{SharedSink, Sink};

use super::levels::LogLevel;

/// Maximum byte length of a prefix and of a message body.
///
/// Longer prefixes are rejected at configuration time; longer bodies are
/// truncated silently when logged.
pub const MAX_LOG_MSG_LENGTH: usize = 200;

/// Registry capacity used by hosts that capture errors instead of printing them.
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Prefix of the diagnostic channel.
///
/// [`DiagPrefix::Default`] renders as `"Warning: "` for warnings and
/// `"Error: "` for errors. A custom prefix is applied to both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagPrefix {
    /// Severity-tiered built-in prefix.
    #[default]
    Default,
    /// Caller supplied prefix.
    Custom(String),
}

impl DiagPrefix {
    /// Builds a prefix from caller text; the empty string selects [`DiagPrefix::Default`].
    #[must_use]
    pub fn custom(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            Self::Default
        } else {
            Self::Custom(prefix)
        }
    }

    /// Prefix text applied to a message of `level`.
    ///
    /// ```
    /// use mslog::{DiagPrefix, LogLevel};
    ///
    /// assert_eq!(DiagPrefix::Default.for_level(LogLevel::Warning), "Warning: ");
    /// assert_eq!(DiagPrefix::Default.for_level(LogLevel::Error), "Error: ");
    /// assert_eq!(DiagPrefix::custom("ERR: ").for_level(LogLevel::Warning), "ERR: ");
    /// ```
    #[must_use]
    pub fn for_level(&self, level: LogLevel) -> &str {
        match self {
            Self::Default => level.default_diag_prefix(),
            Self::Custom(prefix) => prefix,
        }
    }

    /// Reports whether the built-in prefix is active.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Which messages are buffered while the registry is enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BufferPolicy {
    /// Only warnings and errors are buffered; informational output is printed.
    #[default]
    DiagnosticsOnly,
    /// Every message is buffered.
    All,
}

impl BufferPolicy {
    /// Reports whether a message of `level` is buffered under this policy.
    #[must_use]
    pub const fn buffers(self, level: LogLevel) -> bool {
        match self {
            Self::DiagnosticsOnly => level.is_diagnostic(),
            Self::All => true,
        }
    }
}

/// Settings applied by [`ChannelConfig::configure`](crate::ChannelConfig::configure).
///
/// Every `None` field keeps the value currently held by the configuration
/// (for a fresh configuration, the built-in default). The registry capacity is
/// always applied; it defaults to `0`, which disables buffering.
///
/// ```
/// use mslog::{BufferPolicy, LogSettings};
/// use mslog_sink::CollectingSink;
///
/// let errors = CollectingSink::new();
/// let settings = LogSettings::buffered(5)
///     .diag_sink(errors.clone())
///     .diag_prefix("ERR: ")
///     .policy(BufferPolicy::DiagnosticsOnly);
///
/// assert_eq!(settings.capacity(), 5);
/// ```
#[derive(Clone, Default)]
pub struct LogSettings {
    pub(crate) log_sink: Option<SharedSink>,
    pub(crate) log_prefix: Option<String>,
    pub(crate) diag_sink: Option<SharedSink>,
    pub(crate) diag_prefix: Option<String>,
    pub(crate) max_messages: usize,
    pub(crate) policy: Option<BufferPolicy>,
}

impl LogSettings {
    /// Settings that keep every field and disable buffering.
    ///
    /// To force buffering off regardless of the capacity a caller passes, use
    /// [`ChannelConfig::loginit`](crate::ChannelConfig::loginit) or
    /// [`loginit`](crate::loginit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with a registry of `max_messages` entries.
    #[must_use]
    pub fn buffered(max_messages: usize) -> Self {
        Self::new().max_messages(max_messages)
    }

    /// Installs the sink of the informational channel.
    #[must_use]
    pub fn log_sink<S>(self, sink: S) -> Self
    where
        S: Sink + 'static,
    {
        self.shared_log_sink(Arc::new(sink))
    }

    /// Installs an already shared sink on the informational channel.
    #[must_use]
    pub fn shared_log_sink(mut self, sink: SharedSink) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Sets the informational channel prefix.
    #[must_use]
    pub fn log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = Some(prefix.into());
        self
    }

    /// Installs the sink of the diagnostic channel.
    #[must_use]
    pub fn diag_sink<S>(self, sink: S) -> Self
    where
        S: Sink + 'static,
    {
        self.shared_diag_sink(Arc::new(sink))
    }

    /// Installs an already shared sink on the diagnostic channel.
    #[must_use]
    pub fn shared_diag_sink(mut self, sink: SharedSink) -> Self {
        self.diag_sink = Some(sink);
        self
    }

    /// Sets the diagnostic channel prefix; an empty string restores the
    /// severity-tiered default.
    #[must_use]
    pub fn diag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.diag_prefix = Some(prefix.into());
        self
    }

    /// Sets the registry capacity; `0` disables buffering.
    #[must_use]
    pub fn max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    /// Selects which levels are buffered.
    #[must_use]
    pub fn policy(mut self, policy: BufferPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Registry capacity these settings apply.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.max_messages
    }
}

impl fmt::Debug for LogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSettings")
            .field("log_sink", &self.log_sink.is_some())
            .field("log_prefix", &self.log_prefix)
            .field("diag_sink", &self.diag_sink.is_some())
            .field("diag_prefix", &self.diag_prefix)
            .field("max_messages", &self.max_messages)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Sink-free channel settings that can be loaded from host configuration.
///
/// `error_prefix` follows the naming hosts expose to their users; it maps to
/// the diagnostic prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelSettings {
    /// Informational channel prefix; `None` keeps the current one.
    pub log_prefix: Option<String>,
    /// Diagnostic channel prefix; `None` keeps the current one.
    pub error_prefix: Option<String>,
    /// Registry capacity.
    pub max_messages: usize,
    /// Buffering policy.
    pub policy: BufferPolicy,
}

impl ChannelSettings {
    /// Settings that buffer up to [`DEFAULT_MAX_MESSAGES`] diagnostics.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            ..Self::default()
        }
    }
}

impl From<ChannelSettings> for LogSettings {
    fn from(settings: ChannelSettings) -> Self {
        let ChannelSettings {
            log_prefix,
            error_prefix,
            max_messages,
            policy,
        } = settings;

        Self {
            log_prefix,
            diag_prefix: error_prefix,
            max_messages,
            policy: Some(policy),
            ..Self::default()
        }
    }
}
