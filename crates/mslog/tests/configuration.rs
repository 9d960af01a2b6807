//! Integration tests for channel (re)configuration.
//!
//! Prefix rejection, reinitialisation semantics and large capacities.

use mslog::{
    BufferPolicy, ChannelConfig, ChannelSettings, ConfigError, DiagPrefix, LogSettings,
    MAX_LOG_MSG_LENGTH,
};
use mslog_sink::CollectingSink;

fn over_long() -> String {
    "x".repeat(MAX_LOG_MSG_LENGTH + 1)
}

// ============================================================================
// Prefix Rejection Tests
// ============================================================================

/// An over-long log prefix is reported on the diagnostic sink and leaves the
/// earlier configuration intact.
#[test]
fn long_log_prefix_is_rejected() {
    let output = CollectingSink::new();
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(
        LogSettings::new()
            .log_sink(output.clone())
            .diag_sink(errors.clone())
            .log_prefix("LOG: ")
            .diag_prefix("ERR: "),
    )
    .unwrap();

    let result = config.configure(LogSettings::new().log_prefix(over_long()));

    assert_eq!(
        result,
        Err(ConfigError::LogPrefixTooLarge {
            length: MAX_LOG_MSG_LENGTH + 1
        })
    );
    assert_eq!(errors.lines(), ["ERR: log message prefix is too large"]);
    assert_eq!(config.log_prefix(), "LOG: ");
    assert_eq!(config.diag_prefix(), &DiagPrefix::custom("ERR: "));

    config.log(0, "still routed");
    assert_eq!(output.lines(), ["LOG: still routed"]);
}

/// An over-long diagnostic prefix is rejected symmetrically.
#[test]
fn long_diag_prefix_is_rejected() {
    let errors = CollectingSink::new();
    let mut config =
        ChannelConfig::from_settings(LogSettings::new().diag_sink(errors.clone())).unwrap();

    let result = config.configure(LogSettings::new().diag_prefix(over_long()));

    assert!(matches!(result, Err(ConfigError::DiagPrefixTooLarge { .. })));
    assert_eq!(errors.lines(), ["Error: error message prefix is too large"]);
    assert!(config.diag_prefix().is_default());
}

/// A prefix of exactly the maximum length is accepted.
#[test]
fn prefix_at_limit_is_accepted() {
    let prefix = "p".repeat(MAX_LOG_MSG_LENGTH);
    let mut config = ChannelConfig::new();

    assert!(config.configure(LogSettings::new().log_prefix(prefix.clone())).is_ok());
    assert_eq!(config.log_prefix(), prefix);
}

/// The rejection goes through the sink installed by the same call, and the
/// other fields still take effect.
#[test]
fn rejection_uses_newly_installed_sink() {
    let first = CollectingSink::new();
    let second = CollectingSink::new();
    let mut config =
        ChannelConfig::from_settings(LogSettings::new().diag_sink(first.clone())).unwrap();

    let result = config.configure(
        LogSettings::buffered(3)
            .diag_sink(second.clone())
            .log_prefix(over_long())
            .diag_prefix("[ERR] "),
    );

    assert!(result.is_err());
    assert!(first.is_empty());
    assert_eq!(second.lines(), ["Error: log message prefix is too large"]);
    assert_eq!(config.diag_prefix(), &DiagPrefix::custom("[ERR] "));
    assert_eq!(config.max_messages(), 3);
}

/// Both prefixes rejected: both are reported, the first is returned.
#[test]
fn both_prefixes_rejected() {
    let errors = CollectingSink::new();
    let mut config =
        ChannelConfig::from_settings(LogSettings::new().diag_sink(errors.clone())).unwrap();

    let result = config.configure(
        LogSettings::new()
            .log_prefix(over_long())
            .diag_prefix(over_long()),
    );

    assert!(matches!(result, Err(ConfigError::LogPrefixTooLarge { .. })));
    assert_eq!(
        errors.lines(),
        [
            "Error: log message prefix is too large",
            "Error: error message prefix is too large",
        ]
    );
}

/// Rejections are reported immediately even while buffering is enabled.
#[test]
fn rejection_is_not_buffered() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(
        LogSettings::buffered(4).diag_sink(errors.clone()),
    )
    .unwrap();

    let _ = config.configure(LogSettings::buffered(4).log_prefix(over_long()));

    assert_eq!(errors.len(), 1);
    assert_eq!(config.message_count(), 0);
}

/// `from_settings` survives a rejected prefix.
#[test]
fn from_settings_tolerates_rejection() {
    let errors = CollectingSink::new();
    let config = ChannelConfig::from_settings(
        LogSettings::new()
            .diag_sink(errors.clone())
            .log_prefix(over_long()),
    )
    .expect("rejection is not fatal");

    assert_eq!(config.log_prefix(), "");
    assert_eq!(errors.len(), 1);
}

// ============================================================================
// Reinitialisation Tests
// ============================================================================

/// Unset fields keep the values from the previous configuration.
#[test]
fn unset_fields_are_retained() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(
        LogSettings::new()
            .diag_sink(errors.clone())
            .log_prefix("LOG: ")
            .diag_prefix("ERR: ")
            .policy(BufferPolicy::All),
    )
    .unwrap();

    config.configure(LogSettings::buffered(2)).unwrap();

    assert_eq!(config.log_prefix(), "LOG: ");
    assert_eq!(config.diag_prefix(), &DiagPrefix::custom("ERR: "));
    assert_eq!(config.policy(), BufferPolicy::All);

    config.configure(LogSettings::new()).unwrap();
    config.log(2, "direct");
    assert_eq!(errors.lines(), ["ERR: direct"]);
}

/// Reconfiguring discards buffered messages without emitting them.
#[test]
fn reconfigure_discards_buffer() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(
        LogSettings::buffered(5).diag_sink(errors.clone()),
    )
    .unwrap();
    config.log(2, "Error 1");
    config.log(2, "Error 2");

    config.configure(LogSettings::buffered(8)).unwrap();

    assert_eq!(config.message_count(), 0);
    assert_eq!(config.max_messages(), 8);
    assert!(errors.is_empty());
}

/// An empty diagnostic prefix restores the severity-tiered default.
#[test]
fn empty_diag_prefix_restores_default() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(
        LogSettings::new()
            .diag_sink(errors.clone())
            .diag_prefix("ERROR: "),
    )
    .unwrap();

    config.log(1, "custom");
    config.configure(LogSettings::new().diag_prefix("")).unwrap();
    config.log(1, "tiered");
    config.log(2, "tiered");

    assert_eq!(
        errors.lines(),
        ["ERROR: custom", "Warning: tiered", "Error: tiered"]
    );
}

/// `loginit` forces buffering off.
#[test]
fn loginit_forces_immediate() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(LogSettings::buffered(4)).unwrap();

    config
        .loginit(LogSettings::buffered(4).diag_sink(errors.clone()))
        .unwrap();
    config.log(2, "now");

    assert_eq!(config.max_messages(), 0);
    assert_eq!(errors.lines(), ["Error: now"]);
}

/// Unbuffered output comes from `loginit`, which overrides any requested
/// capacity while the remaining fields still apply.
#[test]
fn loginit_overrides_capacity_keeps_other_fields() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(LogSettings::buffered(2)).unwrap();
    config.log(2, "buffered");

    config
        .loginit(
            LogSettings::buffered(usize::MAX)
                .diag_sink(errors.clone())
                .diag_prefix("LATE: "),
        )
        .unwrap();

    assert_eq!(config.max_messages(), 0);
    assert_eq!(config.message_count(), 0);
    config.log(1, "direct");
    assert_eq!(errors.lines(), ["LATE: direct"]);
}

/// Serialisable channel settings convert into runtime settings.
#[test]
fn channel_settings_apply() {
    let errors = CollectingSink::new();
    let mut config =
        ChannelConfig::from_settings(LogSettings::new().diag_sink(errors.clone())).unwrap();

    let settings = ChannelSettings {
        error_prefix: Some("[mseed] ".into()),
        ..ChannelSettings::capture()
    };
    config.configure(settings.into()).unwrap();
    config.log(2, "bad blockette");

    assert_eq!(config.drain_messages(), ["[mseed] bad blockette"]);
}

// ============================================================================
// Large Capacity Tests
// ============================================================================

/// A capacity far beyond available memory is accepted together with the
/// other fields of the call, and storage only grows with what is buffered.
#[test]
fn huge_capacity_applies_with_other_fields() {
    let errors = CollectingSink::new();
    let mut config = ChannelConfig::from_settings(
        LogSettings::buffered(3)
            .diag_sink(errors.clone())
            .diag_prefix("OLD: "),
    )
    .unwrap();
    config.log(2, "discarded by reconfiguration");

    let capacity = 1usize << 40;
    config
        .configure(LogSettings::buffered(capacity).diag_prefix("NEW: "))
        .unwrap();

    assert_eq!(config.max_messages(), capacity);
    assert_eq!(config.diag_prefix(), &DiagPrefix::custom("NEW: "));
    assert_eq!(config.message_count(), 0);

    for i in 0..5 {
        config.log(2, &format!("Error {i}"));
    }
    assert_eq!(config.message_count(), 5);

    assert_eq!(config.rlog_emit(0, false), 5);
    assert_eq!(errors.lines().first().map(String::as_str), Some("NEW: Error 0"));
}

/// `from_settings` accepts the largest representable capacity.
#[test]
fn from_settings_with_max_capacity() {
    let config = ChannelConfig::from_settings(LogSettings::buffered(usize::MAX)).unwrap();
    assert_eq!(config.max_messages(), usize::MAX);
    assert!(config.registry().is_enabled());
}
