//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize reader answer frames and transport setup so
//! tests across the crate and the tests/ directory build them the same way.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::constants::{PAGE_SIZE, PN532_ACK, PN532_READER_TO_HOST, READ_RESPONSE_LEN};
use crate::protocol::Frame;
use crate::transport::{DiscoveredTag, MockTransport, RadioBackend, Transport};
use crate::TransportError;

/// Encode a reader->host frame around `payload`. Oversized payloads give
/// an empty buffer.
#[doc(hidden)]
pub fn reader_frame(payload: &[u8]) -> Vec<u8> {
    Frame::encode(PN532_READER_TO_HOST, payload).unwrap_or_default()
}

/// ACK followed by `frame`, as the reader sends them.
#[doc(hidden)]
pub fn ack_and(frame: Vec<u8>) -> Vec<u8> {
    let mut out = PN532_ACK.to_vec();
    out.extend(frame);
    out
}

/// SAMConfiguration answer.
#[doc(hidden)]
pub fn wake_frame() -> Vec<u8> {
    reader_frame(&[0x15])
}

/// GetFirmwareVersion answer for a PN532 v1.6.
#[doc(hidden)]
pub fn firmware_frame() -> Vec<u8> {
    reader_frame(&[0x03, 0x32, 0x01, 0x06, 0x07])
}

/// InListPassiveTarget answer with one type A target.
#[doc(hidden)]
pub fn identify_frame(uid: &[u8], atqa: [u8; 2], sak: u8) -> Vec<u8> {
    let mut payload = vec![0x4B, 0x01, 0x01, atqa[0], atqa[1], sak, uid.len() as u8];
    payload.extend_from_slice(uid);
    reader_frame(&payload)
}

/// InListPassiveTarget answer with no target.
#[doc(hidden)]
pub fn no_card_frame() -> Vec<u8> {
    reader_frame(&[0x4B, 0x00])
}

/// READ answer: `page` followed by zeros up to the 16-byte READ size.
#[doc(hidden)]
pub fn read_frame(page: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x41, 0x00];
    let mut data = page.to_vec();
    data.resize(READ_RESPONSE_LEN.max(page.len()), 0);
    payload.extend(data);
    reader_frame(&payload)
}

/// InDataExchange answer with a non-zero status byte.
#[doc(hidden)]
pub fn status_frame(status: u8) -> Vec<u8> {
    reader_frame(&[0x41, status])
}

/// WRITE acknowledgement.
#[doc(hidden)]
pub fn write_ok_frame() -> Vec<u8> {
    reader_frame(&[0x41, 0x00])
}

/// Push the wake-up and firmware answers a connect consumes.
#[doc(hidden)]
pub fn seed_connect(mock: &MockTransport) {
    mock.push_response(ack_and(wake_frame()));
    mock.push_response(ack_and(firmware_frame()));
}

/// Build a MockTransport pre-seeded with the given responses and return
/// it boxed as a Transport trait object along with a handle for asserts.
#[doc(hidden)]
pub fn boxed_mock_with_responses(responses: Vec<Vec<u8>>) -> (Box<dyn Transport>, MockTransport) {
    let mock = MockTransport::new();
    for resp in responses {
        mock.push_response(resp);
    }
    (Box::new(mock.clone()), mock)
}

#[derive(Debug, Default)]
struct RadioState {
    events: Option<mpsc::Sender<DiscoveredTag>>,
    present: Option<DiscoveredTag>,
    memory: Vec<u8>,
    started: bool,
    reads: usize,
    card_failures: usize,
}

impl RadioState {
    fn card_op(&mut self) -> Result<(), TransportError> {
        if self.present.is_none() {
            return Err(TransportError::TagLost("no tag in field".into()));
        }
        if self.card_failures > 0 {
            self.card_failures -= 1;
            return Err(TransportError::TagLost("injected card failure".into()));
        }
        Ok(())
    }
}

/// In-memory radio: tags appear when a test calls `present`, page I/O
/// works on a flat byte image of the card.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRadio {
    state: Arc<Mutex<RadioState>>,
}

impl SimulatedRadio {
    /// Radio with an empty card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Radio whose card holds `memory`, starting at page 0.
    pub fn with_memory(memory: Vec<u8>) -> Self {
        let radio = Self::default();
        radio.lock().memory = memory;
        radio
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RadioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report `tag` entering the field. Returns false when the radio is not
    /// started.
    pub fn present(&self, tag: DiscoveredTag) -> bool {
        let mut st = self.lock();
        let Some(tx) = st.events.clone() else {
            return false;
        };
        st.present = Some(tag.clone());
        tx.try_send(tag).is_ok()
    }

    /// Take the tag out of the field.
    pub fn remove(&self) {
        self.lock().present = None;
    }

    /// Make the next `n` page reads or writes fail as if the tag stopped
    /// answering.
    pub fn fail_card_ops(&self, n: usize) {
        self.lock().card_failures = n;
    }

    /// Current card image.
    pub fn memory(&self) -> Vec<u8> {
        self.lock().memory.clone()
    }

    /// True between `start` and `stop`.
    pub fn is_started(&self) -> bool {
        self.lock().started
    }

    /// Number of READs served.
    pub fn read_count(&self) -> usize {
        self.lock().reads
    }
}

#[async_trait]
impl RadioBackend for SimulatedRadio {
    async fn start(&mut self, events: mpsc::Sender<DiscoveredTag>) -> Result<(), TransportError> {
        let mut st = self.lock();
        st.events = Some(events);
        st.started = true;
        Ok(())
    }

    async fn current_tag(&mut self) -> Result<Option<DiscoveredTag>, TransportError> {
        Ok(self.lock().present.clone())
    }

    async fn read_pages(
        &mut self,
        _tag: &DiscoveredTag,
        page: u8,
    ) -> Result<Vec<u8>, TransportError> {
        let mut st = self.lock();
        st.card_op()?;
        st.reads += 1;
        let start = page as usize * PAGE_SIZE;
        let mut out: Vec<u8> = st
            .memory
            .iter()
            .skip(start)
            .take(READ_RESPONSE_LEN)
            .copied()
            .collect();
        out.resize(READ_RESPONSE_LEN, 0);
        Ok(out)
    }

    async fn write_page(
        &mut self,
        _tag: &DiscoveredTag,
        page: u8,
        data: &[u8],
    ) -> Result<(), TransportError> {
        let mut st = self.lock();
        st.card_op()?;
        let start = page as usize * PAGE_SIZE;
        if st.memory.len() < start + data.len() {
            st.memory.resize(start + data.len(), 0);
        }
        st.memory[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), TransportError> {
        let mut st = self.lock();
        st.events = None;
        st.present = None;
        st.started = false;
        Ok(())
    }
}
