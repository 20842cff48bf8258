//! Utilities for libpn532: small, reusable helpers used across the crate.
//!
//! Hex rendering for wire-level debug logs and the timeout defaults shared by
//! the session config and the transports.

/// Hex formatting helpers.
pub mod hex;
/// Deadline helpers.
pub mod timeout;

pub use hex::*;
pub use timeout::*;
