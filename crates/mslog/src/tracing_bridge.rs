//! crates/mslog/src/tracing_bridge.rs
//! Bridge from the `tracing` crate into the default channel configuration.
//!
//! [`RegistryLayer`] is a `tracing-subscriber` layer that turns `error!`,
//! `warn!` and `info!` events into calls to [`log_from`](crate::log_from), so
//! code instrumented with `tracing` reports through the same prefixes, sinks
//! and registry as code calling [`rlog!`](crate::rlog).
//!
//! # Mapping
//!
//! | tracing level | channel level            |
//! |---------------|--------------------------|
//! | `ERROR`       | [`LogLevel::Error`] (2)  |
//! | `WARN`        | [`LogLevel::Warning`] (1)|
//! | `INFO`        | [`LogLevel::Info`] (0)   |
//! | `DEBUG`/`TRACE` | ignored                |
//!
//! The event target becomes the message origin. Events whose target starts
//! with `mslog` are this crate's own instrumentation and are never forwarded.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mslog::{init_tracing, LogSettings};
//!
//! mslog::configure(LogSettings::buffered(mslog::DEFAULT_MAX_MESSAGES))?;
//! init_tracing();
//!
//! tracing::error!(target: "mseed::unpack", "CRC mismatch");
//! assert_eq!(mslog::drain_messages(), ["Error: CRC mismatch"]);
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::levels::LogLevel;
use super::thread_local::log_from;

const OWN_TARGET: &str = "mslog";

/// A tracing layer that forwards events into the current thread's default
/// channel configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegistryLayer {
    _private: (),
}

impl RegistryLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Maps a tracing level onto a channel level; `DEBUG` and `TRACE` have no
    /// counterpart.
    const fn map_level(level: &Level) -> Option<LogLevel> {
        match *level {
            Level::ERROR => Some(LogLevel::Error),
            Level::WARN => Some(LogLevel::Warning),
            Level::INFO => Some(LogLevel::Info),
            _ => None,
        }
    }

    fn is_own_target(target: &str) -> bool {
        target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::") || rest.starts_with('_'))
    }
}

impl<S> Layer<S> for RegistryLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if Self::is_own_target(target) {
            return;
        }
        let Some(level) = Self::map_level(metadata.level()) else {
            return;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.finish() {
            log_from(level, Some(target), &message);
        }
    }
}

/// Collects the `message` field, appending any other fields as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> Option<String> {
        let mut message = self.message?;
        message.push_str(&self.fields);
        Some(message)
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Installs [`RegistryLayer`] as the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(RegistryLayer::new())
        .init();
}

/// Installs [`RegistryLayer`] behind an additional filter layer, such as an
/// `EnvFilter`.
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// mslog::init_tracing_with_filter(EnvFilter::new("mseed=warn"));
/// ```
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing_with_filter<F>(filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(RegistryLayer::new())
        .init();
}
