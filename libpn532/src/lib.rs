// libpn532/src/lib.rs

//! libpn532
//!
//! Pure Rust driver for PN532-class contactless card readers. A
//! `CardSession` wakes the reader over a serial link (or a native radio
//! backend), scans for ISO 14443-A cards and reads or writes their pages.

#![warn(missing_docs)]

/// Card identity.
pub mod card;
/// Protocol and timing constants.
pub mod constants;
/// Error types.
pub mod error;
/// Common imports.
pub mod prelude;
/// PN532 frame encoding and decoding.
pub mod protocol;
/// Card sessions.
pub mod session;
pub mod test_support;
/// Byte transports to the reader.
pub mod transport;
/// Small value types shared across modules.
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
