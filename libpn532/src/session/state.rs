// libpn532/src/session/state.rs

use derive_more::Display;

/// Where a `CardSession` is in its lifecycle.
///
/// `Connecting`, `Scanning`, `Reading` and `Writing` are transient: exactly
/// one operation owns the session while it is in one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionState {
    /// No link to a reader.
    #[default]
    #[display(fmt = "disconnected")]
    Disconnected,
    /// Handshake in progress.
    #[display(fmt = "connecting")]
    Connecting,
    /// Idle and able to take an operation.
    #[display(fmt = "ready")]
    Ready,
    /// Waiting for a card.
    #[display(fmt = "scanning")]
    Scanning,
    /// Reading pages.
    #[display(fmt = "reading")]
    Reading,
    /// Writing a page.
    #[display(fmt = "writing")]
    Writing,
}

impl ConnectionState {
    /// True while an operation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Connecting | Self::Scanning | Self::Reading | Self::Writing
        )
    }

    /// True once the reader acknowledged wake-up and until disconnect.
    pub fn is_connected(&self) -> bool {
        !matches!(self, Self::Disconnected | Self::Connecting)
    }
}
