#[path = "../common/mod.rs"]
mod common;

use libpn532::{ConnectError, Error, PageBuffer, TransportError};

#[test]
fn only_timeouts_cancels_and_lost_tags_are_recoverable() {
    assert!(!TransportError::Timeout.is_fatal());
    assert!(!TransportError::Cancelled.is_fatal());
    assert!(!TransportError::TagLost("left the field".into()).is_fatal());
    assert!(TransportError::Closed.is_fatal());
    assert!(TransportError::NotConnected.is_fatal());
    assert!(TransportError::Unavailable("gone".into()).is_fatal());
}

#[test]
fn crate_error_classification() {
    let timeout: Error = TransportError::Timeout.into();
    assert!(timeout.is_timeout());
    assert!(!timeout.is_fatal());

    let lost: Error = ConnectError::Transport(TransportError::Closed).into();
    assert!(lost.is_fatal());

    let partial = Error::PartialRead {
        pages: PageBuffer::new(4),
        source: Box::new(TransportError::Timeout.into()),
    };
    assert!(partial.is_timeout());
    assert!(!partial.is_fatal());
    assert_eq!(partial.to_string(), "read stopped after 0 bytes: operation timed out");
}

#[test]
fn partial_read_exposes_source() {
    use std::error::Error as _;

    let partial = Error::PartialRead {
        pages: PageBuffer::new(4),
        source: Box::new(TransportError::Closed.into()),
    };
    assert_eq!(
        partial.source().map(|e| e.to_string()),
        Some("transport closed by peer".to_string())
    );
}
