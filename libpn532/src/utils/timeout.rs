//! Timeout helpers used across the crate.
//!
//! Centralizes the default durations a session waits on the reader so that
//! config defaults and tests agree on them.

use std::time::Duration;

/// Default time a single request/response exchange may take.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Default time the reader gets to answer the wake-up sequence.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;

/// Default time a scan waits for a card to enter the field.
pub const DEFAULT_SCAN_TIMEOUT_MS: u64 = 1000;

/// Default pause between two page reads.
pub const DEFAULT_INTER_PAGE_DELAY_MS: u64 = 50;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default read timeout as Duration.
pub fn default_read_timeout() -> Duration {
    ms(DEFAULT_READ_TIMEOUT_MS)
}

/// Time left until `deadline`, or `None` once it has passed.
pub fn remaining(deadline: tokio::time::Instant) -> Option<Duration> {
    let now = tokio::time::Instant::now();
    if now >= deadline {
        None
    } else {
        Some(deadline - now)
    }
}
