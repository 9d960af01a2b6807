use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Sink;

/// Sink that records every accepted line in memory.
///
/// Clones share the same storage, so a host can hand one clone to a channel
/// configuration and inspect the captured text through another.
///
/// ```
/// use mslog_sink::{CollectingSink, Sink};
///
/// let sink = CollectingSink::new();
/// let handle = sink.clone();
///
/// sink.accept("Warning: gap");
/// sink.accept("Error: overlap");
///
/// assert_eq!(handle.len(), 2);
/// assert_eq!(handle.last().as_deref(), Some("Error: overlap"));
/// assert_eq!(handle.take(), ["Warning: gap", "Error: overlap"]);
/// assert!(handle.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of every recorded line, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Removes and returns every recorded line.
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        mem::take(&mut *self.guard())
    }

    /// Returns the most recently recorded line.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.guard().last().cloned()
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Discards every recorded line.
    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl Sink for CollectingSink {
    fn accept(&self, text: &str) {
        self.guard().push(text.to_owned());
    }
}
