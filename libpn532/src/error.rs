// libpn532/src/error.rs

use thiserror::Error;

use crate::session::{ConnectionState, PageBuffer};

/// Malformed wire bytes. Always recoverable by discarding the buffer and
/// reading again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Missing `00 00 FF` start code.
    #[error("bad preamble: frame does not start with 00 00 ff")]
    BadPreamble,

    /// LEN/LCS or DCS do not agree with the received bytes.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length announced by the header.
        expected: usize,
        /// Length found.
        actual: usize,
    },

    /// DCS does not match the payload.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Checksum computed over the received bytes.
        expected: u8,
        /// Checksum byte on the wire.
        actual: u8,
    },

    /// Frame is shorter than its header claims.
    #[error("truncated frame: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the frame requires.
        needed: usize,
        /// Bytes received.
        available: usize,
    },
}

/// Caller misuse caught before any byte is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Write data is not exactly one block.
    #[error("invalid block size: expected {expected} bytes, got {actual}")]
    InvalidBlockSize {
        /// Block size.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Payload does not fit a normal information frame.
    #[error("command payload too long: at most {max} bytes, got {actual}")]
    PayloadTooLong {
        /// Largest payload a frame can carry.
        max: usize,
        /// Payload length requested.
        actual: usize,
    },
}

/// A well-formed frame that does not carry the answer we asked for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// Frame answers a different command.
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse {
        /// Code answering the command sent.
        expected: u8,
        /// Code received.
        actual: u8,
    },

    /// Answer is shorter than the command requires.
    #[error("response too short: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum answer length.
        expected: usize,
        /// Answer length received.
        actual: usize,
    },

    /// Non-zero status byte returned by the reader.
    #[error("reader reported status {0:#04x}")]
    ReaderStatus(u8),

    /// Reader asked for the request to be sent again.
    #[error("reader rejected the command (nack)")]
    Nack,
}

/// Physical channel failures.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No reader reachable through this transport.
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    /// OS-level I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the serial port layer.
    #[cfg(feature = "serial")]
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// No answer before the deadline.
    #[error("operation timed out")]
    Timeout,

    /// Operation aborted through its cancellation token.
    #[error("exchange cancelled")]
    Cancelled,

    /// Operation needs an open link.
    #[error("transport not connected")]
    NotConnected,

    /// Link was closed by the other side.
    #[error("transport closed by peer")]
    Closed,

    /// The tag left the field or refused a command. The channel itself is
    /// still usable.
    #[error("tag not responding: {0}")]
    TagLost(String),
}

impl TransportError {
    /// Timeouts, cancellations and a lost tag leave the channel usable;
    /// everything else means the port or radio is gone.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TransportError::Timeout | TransportError::Cancelled | TransportError::TagLost(_)
        )
    }
}

/// Failures bringing a reader to the `Ready` state.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Reader never acknowledged SAMConfiguration.
    #[error("reader did not acknowledge wake-up")]
    NoAck,

    /// No transport candidate was configured or reachable.
    #[error("no card reader transport available on this host")]
    NoTransport,

    /// Handshake attempted on a closed link.
    #[error("session is not connected")]
    NotConnected,

    /// Session is already connected.
    #[error("session is already connected")]
    AlreadyConnected,

    /// Link failure during the handshake.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Crate-level error surfaced by `CardSession`.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed bytes on the wire.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Request rejected before sending.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Unexpected or failed answer.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Link failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Handshake failure.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Another operation holds the session.
    #[error("session busy: {state}")]
    Busy {
        /// State of the operation in progress.
        state: ConnectionState,
    },

    /// A read failed after some pages arrived.
    #[error("read stopped after {} bytes: {source}", .pages.len())]
    PartialRead {
        /// Pages read before the failure.
        pages: PageBuffer,
        /// What stopped the read.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// True when the underlying cause is a transport timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport(TransportError::Timeout) => true,
            Error::Connect(ConnectError::Transport(TransportError::Timeout)) => true,
            Error::PartialRead { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// True when the error leaves the reader unusable and the session
    /// should fall back to `Disconnected`.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_fatal(),
            Error::Connect(ConnectError::Transport(e)) => e.is_fatal(),
            Error::PartialRead { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
