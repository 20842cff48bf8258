// libpn532/src/prelude.rs

pub use crate::card::CardIdentity;
pub use crate::protocol::{Command, CommandBuilder, Frame, Response};
pub use crate::session::{
    CardSession, ConnectionState, EventLevel, PageBuffer, SessionBuilder, SessionConfig,
    SessionEvent,
};
pub use crate::transport::{DiscoveredTag, RadioBackend, RadioTransport, Transport, TransportSelector};
#[cfg(feature = "serial")]
pub use crate::transport::{SerialConfig, SerialTransport};
pub use crate::{
    Atqa, BlockData, CardType, CommandError, ConnectError, Error, FirmwareVersion, FrameError,
    ResponseError, Result, TransportError, TransportKind, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_read_timeout, ms, parse_hex};
