// libpn532/src/session/config.rs

use std::time::Duration;

use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_PAGE_CEILING, FIRST_DATA_PAGE, PN532_WAKE_ACK_MARKER,
};
use crate::utils::{
    ms, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_INTER_PAGE_DELAY_MS, DEFAULT_READ_TIMEOUT_MS,
    DEFAULT_SCAN_TIMEOUT_MS,
};

/// Default number of buffered events per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Tunables of a `CardSession`. The page ceiling and inter-page delay were
/// tuned against one NTAG215 reader; other cards may need other values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// First page a full dump reads.
    pub first_page: u8,
    /// Exclusive upper page bound of a full dump.
    pub page_ceiling: u8,
    /// Pause between two page reads.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub inter_page_delay: Duration,
    /// Time allowed for one request and its answer.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub read_timeout: Duration,
    /// Time allowed for the wake-up handshake.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub connect_timeout: Duration,
    /// How long a scan waits for a card.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub scan_timeout: Duration,
    /// Byte sequence whose presence in the wake-up answer means the reader
    /// is awake.
    pub ack_marker: Vec<u8>,
    /// User-granted serial port; `None` falls back to radio.
    pub serial_port: Option<String>,
    /// Serial line speed.
    pub baud_rate: u32,
    /// Events buffered for slow subscribers.
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            first_page: FIRST_DATA_PAGE,
            page_ceiling: DEFAULT_PAGE_CEILING,
            inter_page_delay: ms(DEFAULT_INTER_PAGE_DELAY_MS),
            read_timeout: ms(DEFAULT_READ_TIMEOUT_MS),
            connect_timeout: ms(DEFAULT_CONNECT_TIMEOUT_MS),
            scan_timeout: ms(DEFAULT_SCAN_TIMEOUT_MS),
            ack_marker: PN532_WAKE_ACK_MARKER.to_vec(),
            serial_port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// First page read by `read_pages`.
    pub fn with_first_page(mut self, page: u8) -> Self {
        self.first_page = page;
        self
    }

    /// Last page a dump may reach.
    pub fn with_page_ceiling(mut self, page: u8) -> Self {
        self.page_ceiling = page;
        self
    }

    /// Set `inter_page_delay`.
    pub fn with_inter_page_delay(mut self, delay: Duration) -> Self {
        self.inter_page_delay = delay;
        self
    }

    /// Set `read_timeout`.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set `connect_timeout`.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set `scan_timeout`.
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Bytes that must appear in the wake-up answer.
    pub fn with_ack_marker(mut self, marker: impl Into<Vec<u8>>) -> Self {
        self.ack_marker = marker.into();
        self
    }

    /// Serial device to use instead of the radio.
    pub fn with_serial_port(mut self, port: impl Into<String>) -> Self {
        self.serial_port = Some(port.into());
        self
    }

    /// Set `baud_rate`.
    pub fn with_baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = baud;
        self
    }

    /// Set `event_capacity`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Write as integer milliseconds.
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    /// Read integer milliseconds.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
