//! Integration tests for the per-thread default configuration.
//!
//! Every test runs on its own thread under the default harness, and the
//! default instance is thread-local, so tests do not observe each other.
//! Tests still call `reset` first so they stay valid with `--test-threads=1`.

use std::thread;

use mslog::{
    DEFAULT_MAX_MESSAGES, LogLevel, LogSettings, PopError, capture_errors, configure,
    drain_messages, log, loginit, max_messages, message_count, pop_message, reset, rlog,
    rlog_emit, rlog_free, rlog_pop, with_default,
};
use mslog_sink::CollectingSink;

// ============================================================================
// Default State Tests
// ============================================================================

/// The default instance starts with buffering disabled.
#[test]
fn default_is_unbuffered() {
    reset();
    assert_eq!(max_messages(), 0);
    assert_eq!(message_count(), 0);
    with_default(|config| {
        assert_eq!(config.log_prefix(), "");
        assert!(config.diag_prefix().is_default());
    });
}

/// Free functions operate on the default instance.
#[test]
fn free_functions_share_one_instance() {
    reset();
    let errors = CollectingSink::new();
    configure(LogSettings::buffered(5).diag_sink(errors.clone())).unwrap();

    for i in 0..10 {
        log(2, &format!("Error {i}"));
    }
    assert_eq!(message_count(), 5);

    let mut buffer = [0u8; 64];
    let length = rlog_pop(Some(&mut buffer), false).unwrap();
    assert_eq!(&buffer[..length], b"Error: Error 9");
    assert_eq!(rlog_pop(None, false), Err(PopError::MissingBuffer));

    assert_eq!(rlog_emit(2, false), 2);
    assert_eq!(errors.take(), ["Error: Error 5", "Error: Error 6"]);

    assert_eq!(rlog_free(), 2);
    assert!(errors.is_empty());
    assert_eq!(message_count(), 0);
}

/// `loginit` disables buffering on the default instance.
#[test]
fn loginit_on_default() {
    reset();
    let output = CollectingSink::new();
    loginit(LogSettings::buffered(3).log_sink(output.clone()).log_prefix("[log] ")).unwrap();

    log(LogLevel::Info, "ready");

    assert_eq!(max_messages(), 0);
    assert_eq!(output.lines(), ["[log] ready"]);
}

// ============================================================================
// Error Capture Tests
// ============================================================================

/// `capture_errors` buffers diagnostics for `drain_messages`.
#[test]
fn capture_and_drain() {
    reset();
    capture_errors(None, Some("[mseed] "), DEFAULT_MAX_MESSAGES).unwrap();

    log(2, "Error 1\n");
    log(1, "Warning 1");

    assert_eq!(message_count(), 2);
    assert_eq!(drain_messages(), ["[mseed] Warning 1", "[mseed] Error 1"]);
    assert!(drain_messages().is_empty());
}

/// `capture_errors` keeps prefixes that are not given.
#[test]
fn capture_keeps_unset_prefixes() {
    reset();
    configure(LogSettings::new().diag_prefix("E: ")).unwrap();
    capture_errors(None, None, 2).unwrap();

    log(2, "kept prefix");
    assert_eq!(pop_message().map(|entry| entry.into_text()).as_deref(), Some("E: kept prefix"));
}

/// The macro records the calling module.
#[test]
fn rlog_records_origin() {
    reset();
    capture_errors(None, None, 4).unwrap();

    rlog!(2, "sample rate {} does not match {}", 40.0, 100.0);

    let entry = pop_message().unwrap();
    assert_eq!(entry.text(), "Error: sample rate 40 does not match 100");
    assert_eq!(entry.origin(), Some(module_path!()));
}

// ============================================================================
// Thread Isolation Tests
// ============================================================================

/// Each thread configures its own default instance.
#[test]
fn threads_have_independent_defaults() {
    reset();
    capture_errors(None, Some("main: "), 4).unwrap();
    log(2, "from main");

    let workers: Vec<_> = (0..3)
        .map(|id| {
            thread::spawn(move || {
                assert_eq!(message_count(), 0);
                assert_eq!(max_messages(), 0);

                let prefix = format!("worker {id}: ");
                capture_errors(None, Some(&prefix), 4).unwrap();
                log(2, "failed");
                drain_messages()
            })
        })
        .collect();

    for (id, worker) in workers.into_iter().enumerate() {
        let drained = worker.join().unwrap();
        assert_eq!(drained, [format!("worker {id}: failed")]);
    }

    assert_eq!(drain_messages(), ["main: from main"]);
}

// ============================================================================
// Re-entrancy Tests
// ============================================================================

/// A sink may log through the default instance while being invoked.
#[test]
fn sink_logging_reentrantly() {
    reset();
    let errors = CollectingSink::new();
    let forward = errors.clone();
    configure(LogSettings::new().diag_sink(move |text: &str| {
        if text.starts_with("Error") {
            log(1, "follow-up");
        }
        mslog_sink::Sink::accept(&forward, text);
    }))
    .unwrap();

    log(2, "first");

    assert_eq!(errors.lines(), ["Warning: follow-up", "Error: first"]);
}

/// Emitting from the default instance releases it before calling sinks.
#[test]
fn emit_reentrant_sink() {
    reset();
    let errors = CollectingSink::new();
    let forward = errors.clone();
    configure(
        LogSettings::buffered(4).diag_sink(move |text: &str| {
            mslog_sink::Sink::accept(&forward, text);
            let _ = message_count();
        }),
    )
    .unwrap();

    log(2, "one");
    log(2, "two");

    assert_eq!(rlog_emit(0, false), 2);
    assert_eq!(errors.lines(), ["Error: one", "Error: two"]);
}
