/// Controls whether a [`WriterSink`](crate::WriterSink) terminates each accepted line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline unless the text already ends with one.
    #[default]
    WithNewline,
    /// Write the text exactly as received.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode terminates lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use mslog_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }

    /// Reports whether `text` needs a trailing newline under this mode.
    ///
    /// Diagnostics produced by format strings frequently carry their own
    /// terminator; the sink never doubles it.
    ///
    /// ```
    /// use mslog_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.needs_terminator("Error: CRC mismatch"));
    /// assert!(!LineMode::WithNewline.needs_terminator("Error: CRC mismatch\n"));
    /// assert!(!LineMode::WithoutNewline.needs_terminator("partial"));
    /// ```
    #[must_use]
    pub fn needs_terminator(self, text: &str) -> bool {
        self.append_newline() && !text.ends_with('\n')
    }
}

impl From<bool> for LineMode {
    /// `true` selects [`LineMode::WithNewline`], `false` [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}
