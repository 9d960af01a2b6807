//! crates/mslog/src/trace.rs
//! Internal instrumentation of configuration and registry activity.
//!
//! Every helper emits a `tracing` event when the `tracing` feature is enabled
//! and compiles to an empty inline function otherwise. Events use the
//! `mslog::*` targets, which the tracing bridge layer never
//! forwards back into a channel.

#[cfg(feature = "tracing")]
const REGISTRY_TARGET: &str = "mslog::registry";

#[cfg(feature = "tracing")]
const CONFIG_TARGET: &str = "mslog::config";

// ============================================================================
// Registry events
// ============================================================================

/// Traces entries evicted from a full registry.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_evicted(evicted: usize, capacity: usize) {
    tracing::trace!(
        target: REGISTRY_TARGET,
        evicted = evicted,
        capacity = capacity,
        "registry_evicted"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_evicted(_evicted: usize, _capacity: usize) {}

/// Traces entries leaving the registry through emit, pop or free.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_drained(operation: &'static str, count: usize, remaining: usize) {
    tracing::trace!(
        target: REGISTRY_TARGET,
        operation = operation,
        count = count,
        remaining = remaining,
        "registry_drained"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_drained(_operation: &'static str, _count: usize, _remaining: usize) {}

// ============================================================================
// Configuration events
// ============================================================================

/// Traces a completed (re)configuration.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_configured(capacity: usize, discarded: usize) {
    tracing::debug!(
        target: CONFIG_TARGET,
        capacity = capacity,
        discarded = discarded,
        "channel_configured"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_configured(_capacity: usize, _discarded: usize) {}

/// Traces a prefix rejected for exceeding the length limit.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_prefix_rejected(field: &'static str, length: usize) {
    tracing::debug!(
        target: CONFIG_TARGET,
        field = field,
        length = length,
        "prefix_rejected"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_prefix_rejected(_field: &'static str, _length: usize) {}
