// libpn532/src/transport/traits.rs

use std::time::Duration;

use async_trait::async_trait;

use crate::TransportError;
use crate::types::TransportKind;

/// Transport trait abstracts the physical channel away from protocol and
/// session logic. Implementations move raw bytes only; framing lives in
/// `protocol`.
#[async_trait]
pub trait Transport: Send {
    /// Which physical channel this transport drives
    fn kind(&self) -> TransportKind;

    /// Open the underlying port or radio
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Send raw bytes to the reader
    async fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Receive whatever bytes arrive within `timeout`. An empty wait ends in
    /// `TransportError::Timeout`; a chunk may hold a partial frame.
    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError>;

    /// Discard bytes received but not yet read, such as a late answer to a
    /// command that already timed out. Called before every request.
    async fn clear_input(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Release the channel. Calling it on a closed transport is a no-op.
    async fn disconnect(&mut self) -> Result<(), TransportError>;
}
