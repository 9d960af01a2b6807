#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/mslog-sink/src/lib.rs
//!
//! # Overview
//!
//! `mslog-sink` defines the output side of the `mslog` logging channels: the
//! [`Sink`] capability a channel hands its final text to, and the sinks the
//! workspace ships with.
//!
//! # Design
//!
//! - [`Sink`] is a single-method trait. Closures of type `Fn(&str)` implement
//!   it directly, so hosts can plug in callbacks without defining types.
//! - [`StdoutSink`] and [`StderrSink`] are the built-in defaults for the
//!   informational and diagnostic channels.
//! - [`WriterSink`] adapts any [`std::io::Write`] implementor.
//! - [`CollectingSink`] keeps accepted lines in memory for programmatic
//!   inspection and tests.
//!
//! # Invariants
//!
//! - [`Sink::accept`] never fails; writer errors are dropped.
//! - [`LineMode::WithNewline`] never doubles a terminator already present in
//!   the text.
//!
//! # Examples
//!
//! ```
//! use mslog_sink::{CollectingSink, SharedSink, Sink};
//! use std::sync::Arc;
//!
//! let collector = CollectingSink::new();
//! let shared: SharedSink = Arc::new(collector.clone());
//!
//! shared.accept("Error: CRC mismatch");
//! assert_eq!(collector.lines(), ["Error: CRC mismatch"]);
//! ```
//!
//! # See also
//!
//! - `mslog` for channel configuration, routing and the message registry.

mod line_mode;
mod sink;

pub use line_mode::LineMode;
pub use sink::{CollectingSink, SharedSink, Sink, StderrSink, StdoutSink, WriterSink};
