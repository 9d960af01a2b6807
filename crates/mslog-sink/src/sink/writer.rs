use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use super::Sink;
use crate::line_mode::LineMode;

/// Sink that streams accepted text into an [`io::Write`] target.
///
/// The writer sits behind a mutex so the sink can be shared between channels.
/// Each accepted message is written in a single locked section; with
/// [`LineMode::WithNewline`] a terminator is added when the text lacks one.
///
/// # Examples
///
/// ```
/// use mslog_sink::{LineMode, Sink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.accept("Warning: short record");
/// sink.accept("Error: CRC mismatch\n");
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output, "Warning: short record\nError: CRC mismatch\n");
///
/// let raw = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
/// raw.accept("partial");
/// assert_eq!(raw.into_inner(), b"partial".to_vec());
/// ```
pub struct WriterSink<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that terminates every line.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with an explicit [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
        }
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> WriterSink<W>
where
    W: Write,
{
    /// Writes `text` and reports any I/O failure.
    ///
    /// [`Sink::accept`] routes through this method and discards the error.
    pub fn write_text(&self, text: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        write_line(&mut *writer, text, self.line_mode)
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn accept(&self, text: &str) {
        let _ = self.write_text(text);
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

/// Default sink of the informational channel: standard output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StdoutSink {
    line_mode: LineMode,
}

impl StdoutSink {
    /// Creates a stdout sink with the given [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(line_mode: LineMode) -> Self {
        Self { line_mode }
    }
}

impl Sink for StdoutSink {
    fn accept(&self, text: &str) {
        let _ = write_line(&mut io::stdout().lock(), text, self.line_mode);
    }
}

/// Default sink of the diagnostic channel: standard error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StderrSink {
    line_mode: LineMode,
}

impl StderrSink {
    /// Creates a stderr sink with the given [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(line_mode: LineMode) -> Self {
        Self { line_mode }
    }
}

impl Sink for StderrSink {
    fn accept(&self, text: &str) {
        let _ = write_line(&mut io::stderr().lock(), text, self.line_mode);
    }
}

fn write_line<W>(writer: &mut W, text: &str, line_mode: LineMode) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writer.write_all(text.as_bytes())?;
    if line_mode.needs_terminator(text) {
        writer.write_all(b"\n")?;
    }
    Ok(())
}
