//! crates/mslog/src/levels.rs
//! Severity levels and the channels they route to.

use std::fmt;

/// Severity of a logged message.
///
/// Hosts traditionally pass raw integers: `0` for informational output, `1`
/// for warnings and anything `>= 2` for errors. [`LogLevel::from_raw`] accepts
/// that convention, treating negative values as informational.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Informational output, routed to the log channel.
    Info,
    /// Recoverable problem, routed to the diagnostic channel.
    Warning,
    /// Failure, routed to the diagnostic channel.
    Error,
}

impl LogLevel {
    /// Maps a raw integer level onto a [`LogLevel`].
    ///
    /// ```
    /// use mslog::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_raw(-3), LogLevel::Info);
    /// assert_eq!(LogLevel::from_raw(0), LogLevel::Info);
    /// assert_eq!(LogLevel::from_raw(1), LogLevel::Warning);
    /// assert_eq!(LogLevel::from_raw(2), LogLevel::Error);
    /// assert_eq!(LogLevel::from_raw(9), LogLevel::Error);
    /// ```
    #[must_use]
    pub const fn from_raw(level: i32) -> Self {
        match level {
            i32::MIN..=0 => Self::Info,
            1 => Self::Warning,
            _ => Self::Error,
        }
    }

    /// Returns the canonical integer for this level.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Info => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }

    /// Channel that carries messages of this level.
    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::Info => Channel::Log,
            Self::Warning | Self::Error => Channel::Diagnostic,
        }
    }

    /// Reports whether the level belongs to the diagnostic channel.
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        matches!(self.channel(), Channel::Diagnostic)
    }

    /// Prefix applied on the diagnostic channel while no custom prefix is set.
    #[must_use]
    pub const fn default_diag_prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Warning => "Warning: ",
            Self::Error => "Error: ",
        }
    }

    /// Lowercase name of the level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl From<i32> for LogLevel {
    fn from(level: i32) -> Self {
        Self::from_raw(level)
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level.as_raw()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two independent output paths of a channel configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Informational output.
    Log,
    /// Warnings and errors.
    Diagnostic,
}
