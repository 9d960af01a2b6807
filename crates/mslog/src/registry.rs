//! crates/mslog/src/registry.rs
//! Bounded, insertion-ordered store of formatted messages.

use std::borrow::Cow;
use std::collections::{TryReserveError, VecDeque};
use std::fmt;

use super::levels::LogLevel;

/// Upper bound on the slots a registry reserves when it is created.
const INITIAL_RESERVE: usize = 64;

/// A formatted message held by the registry.
///
/// `text` already carries the channel prefix. `origin` names the code that
/// logged the message (the macros record `module_path!()`), and is only used
/// when rendering with context.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    level: LogLevel,
    origin: Option<Cow<'static, str>>,
    text: String,
}

impl LogEntry {
    /// Creates an entry from its parts.
    #[must_use]
    pub fn new(level: LogLevel, origin: Option<&'static str>, text: String) -> Self {
        Self {
            level,
            origin: origin.map(Cow::Borrowed),
            text,
        }
    }

    /// Severity the message was logged with.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Code location that logged the message, if recorded.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Formatted text, prefix included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the entry and returns its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Renders the entry, optionally preceded by its origin.
    ///
    /// ```
    /// use mslog::{LogEntry, LogLevel};
    ///
    /// let entry = LogEntry::new(LogLevel::Error, Some("reader::unpack"), "Error: CRC mismatch".into());
    /// assert_eq!(entry.render(false), "Error: CRC mismatch");
    /// assert_eq!(entry.render(true), "reader::unpack() Error: CRC mismatch");
    /// ```
    #[must_use]
    pub fn render(&self, context: bool) -> Cow<'_, str> {
        match self.origin.as_deref() {
            Some(origin) if context => Cow::Owned(format!("{origin}() {}", self.text)),
            _ => Cow::Borrowed(&self.text),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Capacity-bounded FIFO of [`LogEntry`] values.
///
/// Appends go to the tail. Once `capacity` entries are held, each append
/// evicts the oldest entry first, so the registry always keeps the most
/// recent messages. A capacity of zero disables the registry entirely.
///
/// Only the logging API mutates a registry; callers observe it through
/// [`ChannelConfig::registry`](crate::ChannelConfig::registry).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageRegistry {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl MessageRegistry {
    /// A disabled registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            entries: VecDeque::new(),
        }
    }

    /// A registry bounded to `capacity` entries.
    ///
    /// At most `INITIAL_RESERVE` slots are reserved here; storage beyond that
    /// grows with the entries actually buffered, so a large capacity costs
    /// nothing until it is used.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut entries = VecDeque::new();
        entries.try_reserve_exact(capacity.min(INITIAL_RESERVE))?;
        Ok(Self { capacity, entries })
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reports whether buffering is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Number of buffered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no entries are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over buffered entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Most recently appended entry.
    #[must_use]
    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Oldest retained entry.
    #[must_use]
    pub fn oldest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Appends `entry`, returning how many entries were evicted to make room.
    ///
    /// With a zero capacity the entry itself is dropped and counted.
    pub(crate) fn push(&mut self, entry: LogEntry) -> usize {
        if self.capacity == 0 {
            return 1;
        }

        let mut evicted = 0;
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        self.entries.push_back(entry);
        evicted
    }

    /// Removes up to `count` entries from the head; `0` removes everything.
    pub(crate) fn take_oldest(&mut self, count: usize) -> Vec<LogEntry> {
        let len = self.entries.len();
        let take = if count == 0 { len } else { count.min(len) };
        self.entries.drain(..take).collect()
    }

    /// Removes the most recently appended entry.
    pub(crate) fn pop_newest(&mut self) -> Option<LogEntry> {
        self.entries.pop_back()
    }

    /// Drops every entry and returns how many were held.
    pub(crate) fn clear(&mut self) -> usize {
        let discarded = self.entries.len();
        self.entries.clear();
        discarded
    }
}

impl<'a> IntoIterator for &'a MessageRegistry {
    type Item = &'a LogEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
