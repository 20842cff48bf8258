// libpn532/src/transport/radio/mod.rs

//! Native short-range radio transport.
//!
//! Radio APIs push "tag discovered" events and expose page reads directly,
//! with no reader command frames involved. `RadioTransport` answers the
//! PN532 frames the session sends locally, so the session drives a radio
//! exactly as it drives a serial reader.

#[cfg(feature = "pcsc")]
pub mod pcsc;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace, warn};
use tokio::sync::mpsc;

use crate::constants::{
    CARD_CMD_READ, CARD_CMD_WRITE, PN532_ACK, PN532_CMD_GET_FIRMWARE_VERSION,
    PN532_CMD_IN_DATA_EXCHANGE, PN532_CMD_IN_LIST_PASSIVE_TARGET, PN532_CMD_SAM_CONFIGURATION,
    PN532_ERROR_FRAME_ID, PN532_READER_TO_HOST,
};
use crate::protocol::codec::{self, Message};
use crate::protocol::Frame;
use crate::transport::traits::Transport;
use crate::types::TransportKind;
use crate::TransportError;

/// Capacity of the tag event channel between backend and transport.
const TAG_CHANNEL_CAPACITY: usize = 16;

/// InDataExchange status reported when no tag is selected.
const STATUS_TARGET_TIMEOUT: u8 = 0x01;

/// Identity reported for firmware queries over radio.
const RADIO_FIRMWARE: [u8; 4] = [0x32, 0x01, 0x06, 0x07];

/// A tag the radio reported in its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTag {
    /// Serial number.
    pub uid: Vec<u8>,
    /// ATQA as sent by the tag.
    pub atqa: [u8; 2],
    /// SAK byte.
    pub sak: u8,
}

impl DiscoveredTag {
    /// InListPassiveTarget answer payload for this tag.
    fn to_identify_payload(&self) -> Vec<u8> {
        let mut p = vec![
            PN532_CMD_IN_LIST_PASSIVE_TARGET + 1,
            0x01,
            0x01,
            self.atqa[0],
            self.atqa[1],
            self.sak,
            self.uid.len() as u8,
        ];
        p.extend_from_slice(&self.uid);
        p
    }
}

/// Platform radio API. Implementations push `DiscoveredTag` events into
/// the sender handed to `start` and serve page I/O for the current tag.
///
/// Card-level failures (tag gone, command refused) are reported as
/// `TransportError::TagLost`; any other error means the radio is unusable.
#[async_trait]
pub trait RadioBackend: Send {
    /// Begin delivering tag events.
    async fn start(&mut self, events: mpsc::Sender<DiscoveredTag>) -> Result<(), TransportError>;

    /// Tag still in the field, if any.
    async fn current_tag(&mut self) -> Result<Option<DiscoveredTag>, TransportError>;

    /// Read four consecutive pages (16 bytes) starting at `page`.
    async fn read_pages(&mut self, tag: &DiscoveredTag, page: u8)
        -> Result<Vec<u8>, TransportError>;

    /// Write one page.
    async fn write_page(
        &mut self,
        tag: &DiscoveredTag,
        page: u8,
        data: &[u8],
    ) -> Result<(), TransportError>;

    /// Stop delivering events and release the radio.
    async fn stop(&mut self) -> Result<(), TransportError>;
}

type TagCallback = Arc<dyn Fn(&DiscoveredTag) + Send + Sync>;

/// Transport over a push-based radio backend.
pub struct RadioTransport {
    backend: Box<dyn RadioBackend>,
    events: Option<mpsc::Receiver<DiscoveredTag>>,
    replies: VecDeque<Vec<u8>>,
    awaiting_tag: bool,
    current: Option<DiscoveredTag>,
    callbacks: Vec<TagCallback>,
}

impl RadioTransport {
    /// Transport answering through `backend`.
    pub fn new(backend: Box<dyn RadioBackend>) -> Self {
        Self {
            backend,
            events: None,
            replies: VecDeque::new(),
            awaiting_tag: false,
            current: None,
            callbacks: Vec::new(),
        }
    }

    /// Register an observer invoked for every tag event consumed by a scan.
    pub fn on_tag_discovered<F>(&mut self, callback: F)
    where
        F: Fn(&DiscoveredTag) + Send + Sync + 'static,
    {
        self.callbacks.push(Arc::new(callback));
    }

    /// Tag selected by the last scan, if still in the field.
    pub fn current_tag(&self) -> Option<&DiscoveredTag> {
        self.current.as_ref()
    }

    fn reply(&mut self, payload: Vec<u8>) {
        match Frame::encode(PN532_READER_TO_HOST, &payload) {
            Ok(bytes) => self.replies.push_back(bytes),
            Err(e) => warn!("dropping oversized radio reply: {}", e),
        }
    }

    fn reply_error(&mut self) {
        if let Ok(bytes) = Frame::encode(PN532_ERROR_FRAME_ID, &[]) {
            self.replies.push_back(bytes);
        }
    }

    fn notify(&self, tag: &DiscoveredTag) {
        debug!("radio tag discovered: uid={}", crate::utils::bytes_to_hex(&tag.uid));
        for cb in &self.callbacks {
            cb(tag);
        }
    }

    fn accept_tag(&mut self, tag: DiscoveredTag) -> Vec<u8> {
        self.notify(&tag);
        let payload = tag.to_identify_payload();
        self.current = Some(tag);
        self.awaiting_tag = false;
        Frame::encode(PN532_READER_TO_HOST, &payload).unwrap_or_default()
    }

    /// InListPassiveTarget: list the tag still in the field right away,
    /// otherwise wait for the next discovery event.
    async fn list_target(&mut self) -> Result<(), TransportError> {
        while let Some(tag) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.notify(&tag);
        }

        match self.backend.current_tag().await? {
            Some(tag) => {
                let payload = tag.to_identify_payload();
                self.current = Some(tag);
                self.reply(payload);
            }
            None => {
                self.current = None;
                self.awaiting_tag = true;
            }
        }
        Ok(())
    }

    async fn exchange_data(&mut self, tail: &[u8]) -> Result<(), TransportError> {
        let Some(tag) = self.current.clone() else {
            self.reply(vec![PN532_CMD_IN_DATA_EXCHANGE + 1, STATUS_TARGET_TIMEOUT]);
            return Ok(());
        };

        let answer = match tail {
            [CARD_CMD_READ, page] => self.backend.read_pages(&tag, *page).await,
            [CARD_CMD_WRITE, page, data @ ..] => self
                .backend
                .write_page(&tag, *page, data)
                .await
                .map(|()| Vec::new()),
            _ => {
                self.reply_error();
                return Ok(());
            }
        };

        match answer {
            Ok(data) => {
                let mut payload = vec![PN532_CMD_IN_DATA_EXCHANGE + 1, 0x00];
                payload.extend_from_slice(&data);
                self.reply(payload);
            }
            // Same answer a PN532 gives when the target stops responding.
            Err(TransportError::TagLost(why)) => {
                debug!("radio tag lost: {}", why);
                self.current = None;
                self.reply(vec![PN532_CMD_IN_DATA_EXCHANGE + 1, STATUS_TARGET_TIMEOUT]);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for RadioTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Radio
    }

    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.events.is_some() {
            return Ok(());
        }
        let (tx, rx) = mpsc::channel(TAG_CHANNEL_CAPACITY);
        self.backend.start(tx).await?;
        self.events = Some(rx);
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if self.events.is_none() {
            return Err(TransportError::NotConnected);
        }

        let frame = match codec::next_message(data) {
            Ok(Some((Message::Data(frame), _))) => frame,
            Ok(Some((Message::Ack, _))) => {
                trace!("radio: host abort");
                self.awaiting_tag = false;
                self.replies.clear();
                return Ok(());
            }
            Ok(Some((Message::Nack, _))) | Ok(None) | Err(_) => {
                warn!("radio: ignoring unparseable host bytes");
                return Ok(());
            }
        };

        self.replies.push_back(PN532_ACK.to_vec());
        match frame.payload() {
            [PN532_CMD_SAM_CONFIGURATION, ..] => {
                self.reply(vec![PN532_CMD_SAM_CONFIGURATION + 1]);
            }
            [PN532_CMD_GET_FIRMWARE_VERSION] => {
                let mut payload = vec![PN532_CMD_GET_FIRMWARE_VERSION + 1];
                payload.extend_from_slice(&RADIO_FIRMWARE);
                self.reply(payload);
            }
            [PN532_CMD_IN_LIST_PASSIVE_TARGET, ..] => self.list_target().await?,
            [PN532_CMD_IN_DATA_EXCHANGE, _target, tail @ ..] => {
                self.exchange_data(tail).await?;
            }
            _ => self.reply_error(),
        }
        Ok(())
    }

    async fn clear_input(&mut self) -> Result<(), TransportError> {
        if !self.replies.is_empty() {
            trace!("radio: dropping {} stale replies", self.replies.len());
            self.replies.clear();
        }
        Ok(())
    }

    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        if let Some(bytes) = self.replies.pop_front() {
            return Ok(bytes);
        }

        if !self.awaiting_tag {
            tokio::time::sleep(timeout).await;
            return Err(TransportError::Timeout);
        }

        let events = self.events.as_mut().ok_or(TransportError::NotConnected)?;
        match tokio::time::timeout(timeout, events.recv()).await {
            Ok(Some(tag)) => Ok(self.accept_tag(tag)),
            Ok(None) => Err(TransportError::Closed),
            Err(_) => Err(TransportError::Timeout),
        }
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.events.take().is_none() {
            return Ok(());
        }
        self.replies.clear();
        self.awaiting_tag = false;
        self.current = None;
        self.backend.stop().await
    }
}
