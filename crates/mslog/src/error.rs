//! crates/mslog/src/error.rs
//! Errors reported by channel configuration and registry retrieval.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure while applying [`LogSettings`](crate::LogSettings).
///
/// Prefix rejections are also reported through the diagnostic sink; their
/// `Display` text is exactly the message the sink receives (before the
/// diagnostic prefix is applied).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The log channel prefix exceeds [`MAX_LOG_MSG_LENGTH`](crate::MAX_LOG_MSG_LENGTH).
    #[error("log message prefix is too large")]
    LogPrefixTooLarge {
        /// Byte length of the rejected prefix.
        length: usize,
    },
    /// The diagnostic channel prefix exceeds [`MAX_LOG_MSG_LENGTH`](crate::MAX_LOG_MSG_LENGTH).
    #[error("error message prefix is too large")]
    DiagPrefixTooLarge {
        /// Byte length of the rejected prefix.
        length: usize,
    },
    /// Storage for the message registry could not be reserved.
    #[error("cannot allocate a message registry for {requested} messages")]
    Allocation {
        /// Requested registry capacity.
        requested: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },
}

impl ConfigError {
    /// Reports whether the error rejected a single field while the rest of
    /// the settings were applied.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::LogPrefixTooLarge { .. } | Self::DiagPrefixTooLarge { .. }
        )
    }
}

/// Invalid arguments passed to [`ChannelConfig::rlog_pop`](crate::ChannelConfig::rlog_pop).
///
/// The registry is left untouched whenever this error is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum PopError {
    /// No output buffer was supplied.
    #[error("no output buffer supplied")]
    MissingBuffer,
    /// The output buffer has zero length.
    #[error("output buffer has zero length")]
    EmptyBuffer,
}

impl PopError {
    /// Integer sentinel for hosts that report pop outcomes as status codes.
    ///
    /// Successful pops report the copied length and an empty registry
    /// reports `0`, so invalid arguments use `-1`.
    #[must_use]
    pub const fn status(self) -> i32 {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn reserve_failure() -> TryReserveError {
        let mut storage: Vec<u64> = Vec::new();
        storage.try_reserve_exact(usize::MAX).unwrap_err()
    }

    #[test]
    fn rejection_messages_match_sink_reports() {
        assert_eq!(
            ConfigError::LogPrefixTooLarge { length: 300 }.to_string(),
            "log message prefix is too large"
        );
        assert_eq!(
            ConfigError::DiagPrefixTooLarge { length: 300 }.to_string(),
            "error message prefix is too large"
        );
    }

    #[test]
    fn allocation_error_keeps_source() {
        let error = ConfigError::Allocation {
            requested: usize::MAX,
            source: reserve_failure(),
        };
        assert!(!error.is_rejection());
        assert!(error.source().is_some());
        assert!(error.to_string().contains("cannot allocate"));
    }

    #[test]
    fn prefix_errors_are_rejections() {
        assert!(ConfigError::LogPrefixTooLarge { length: 201 }.is_rejection());
        assert!(ConfigError::DiagPrefixTooLarge { length: 201 }.is_rejection());
    }

    #[test]
    fn pop_errors_share_sentinel() {
        assert_eq!(PopError::MissingBuffer.status(), -1);
        assert_eq!(PopError::EmptyBuffer.status(), -1);
        assert_ne!(PopError::MissingBuffer, PopError::EmptyBuffer);
    }
}
