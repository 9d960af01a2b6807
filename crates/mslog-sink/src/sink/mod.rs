use std::sync::Arc;

mod collecting;
mod writer;

pub use collecting::CollectingSink;
pub use writer::{StderrSink, StdoutSink, WriterSink};

/// Output capability for one logging channel.
///
/// A sink receives the final text of a diagnostic (prefix already applied) and
/// decides where it goes. Implementations must not fail: a logging call has no
/// way to report an error back to its caller, so write failures are swallowed
/// by the sink itself.
///
/// Any `Fn(&str) + Send + Sync` closure is a sink:
///
/// ```
/// use mslog_sink::Sink;
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let capture = {
///     let seen = Arc::clone(&seen);
///     move |text: &str| seen.lock().unwrap().push(text.to_owned())
/// };
///
/// capture.accept("Error: CRC mismatch");
/// assert_eq!(seen.lock().unwrap().as_slice(), ["Error: CRC mismatch"]);
/// ```
pub trait Sink: Send + Sync {
    /// Consumes one formatted message.
    fn accept(&self, text: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn accept(&self, text: &str) {
        self(text);
    }
}

/// Reference-counted handle under which channel configurations hold sinks.
///
/// Sinks are shared rather than owned so the same destination can back
/// several channels or several configurations.
pub type SharedSink = Arc<dyn Sink>;
