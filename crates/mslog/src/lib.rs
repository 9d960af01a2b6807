#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/mslog/src/lib.rs
//!
//! # Overview
//!
//! `mslog` is the diagnostic logging facility used by the miniSEED codec
//! layers. Messages travel on two channels: informational output on the log
//! channel and warnings/errors on the diagnostic channel. Each channel has its
//! own [`Sink`](mslog_sink::Sink) and prefix. Instead of being written
//! immediately, messages can be held in a bounded in-memory registry and
//! later emitted, popped or discarded, which lets library callers inspect
//! errors programmatically.
//!
//! # Design
//!
//! - [`ChannelConfig`] owns the sinks, the prefixes and the
//!   [`MessageRegistry`]. It is reconfigured with [`LogSettings`]; unset
//!   fields keep their current value.
//! - [`ChannelConfig::log`] formats a message (prefix + body truncated to
//!   [`MAX_LOG_MSG_LENGTH`] bytes) and either hands it to the channel sink or
//!   appends it to the registry, depending on the capacity and the
//!   [`BufferPolicy`].
//! - The registry keeps the most recent messages: a full registry evicts its
//!   oldest entry on every append. [`ChannelConfig::rlog_emit`] drains it
//!   oldest first through the sinks, [`ChannelConfig::rlog_pop`] returns the
//!   newest entry to the caller and [`ChannelConfig::rlog_free`] discards
//!   everything.
//! - Every thread has a default configuration reached through the free
//!   functions ([`log`], [`configure`], [`rlog_emit`], ...) and the [`rlog!`]
//!   macro. It starts with stdout/stderr sinks and buffering disabled.
//! - With the `tracing` feature, `RegistryLayer` forwards `tracing` events
//!   into the default configuration and the crate traces its own registry
//!   activity under the `mslog::*` targets.
//!
//! # Invariants
//!
//! - A registry never holds more than its capacity; capacity `0` keeps it
//!   empty.
//! - Prefixes never exceed [`MAX_LOG_MSG_LENGTH`] bytes. Longer prefixes are
//!   rejected, reported on the diagnostic channel and leave the current value
//!   in place.
//! - Logging never fails and never panics.
//! - No configuration performs internal locking; sharing one across threads
//!   requires external synchronisation.
//!
//! # Errors
//!
//! Reconfiguration reports [`ConfigError`]: a prefix rejection (the other
//! settings still apply) or a failed initial registry reservation (nothing
//! changes). Registry capacity itself is never rejected.
//! [`ChannelConfig::rlog_pop`] reports [`PopError`] for a missing or empty
//! output buffer. An empty registry is not an error.
//!
//! # Examples
//!
//! Capture warnings and errors, then print them on demand:
//!
//! ```
//! use mslog::{ChannelConfig, LogLevel, LogSettings};
//! use mslog_sink::CollectingSink;
//!
//! let output = CollectingSink::new();
//! let errors = CollectingSink::new();
//! let mut config = ChannelConfig::from_settings(
//!     LogSettings::buffered(2)
//!         .log_sink(output.clone())
//!         .diag_sink(errors.clone())
//!         .log_prefix("mseed: "),
//! )?;
//!
//! config.log(LogLevel::Info, "reading file");
//! config.log(LogLevel::Warning, "Warning 1");
//! config.log(LogLevel::Error, "Error 1");
//! config.log(LogLevel::Error, "Error 2");
//!
//! // Informational output is never buffered by default.
//! assert_eq!(output.lines(), ["mseed: reading file"]);
//!
//! // Capacity 2: the oldest diagnostic was evicted.
//! assert_eq!(config.rlog_emit(0, false), 2);
//! assert_eq!(errors.lines(), ["Error: Error 1", "Error: Error 2"]);
//! # Ok::<(), mslog::ConfigError>(())
//! ```
//!
//! # See also
//!
//! - [`mslog_sink`] for the sink trait and the built-in sinks.

mod channel;
mod config;
mod error;
mod levels;
mod macros;
mod registry;
mod thread_local;
mod trace;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use channel::ChannelConfig;
pub use config::{
    BufferPolicy, ChannelSettings, DEFAULT_MAX_MESSAGES, DiagPrefix, LogSettings,
    MAX_LOG_MSG_LENGTH,
};
pub use error::{ConfigError, PopError};
pub use levels::{Channel, LogLevel};
pub use registry::{LogEntry, MessageRegistry};
pub use thread_local::{
    capture_errors, configure, drain_messages, log, log_fmt, log_from, loginit, max_messages,
    message_count, pop_message, reset, rlog_emit, rlog_free, rlog_pop, with_default,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{RegistryLayer, init_tracing, init_tracing_with_filter};
