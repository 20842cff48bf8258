// libpn532/src/transport/radio/pcsc.rs

//! PC/SC radio backend (ACR122U and similar readers exposing PN532-class
//! chips through the platform smart-card service).

use std::ffi::CString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use pcsc::{Card, Context, Protocols, ReaderState, Scope, ShareMode, State};
use tokio::sync::mpsc;

use super::{DiscoveredTag, RadioBackend};
use crate::TransportError;

/// How long one status-change wait blocks before re-checking the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// ATR card-name bytes (PC/SC part 3 storage-card ATR, offsets 13..15).
const ATR_NAME_OFFSET: usize = 13;
const CARD_NAME_MIFARE_1K: [u8; 2] = [0x00, 0x01];
const CARD_NAME_ULTRALIGHT: [u8; 2] = [0x00, 0x03];

const SW_OK: [u8; 2] = [0x90, 0x00];

fn pcsc_err(e: pcsc::Error) -> TransportError {
    TransportError::Unavailable(format!("pcsc: {e}"))
}

/// Errors from talking to a card: a missing or mute card is `TagLost`,
/// anything else means the PC/SC service is gone.
fn card_err(e: pcsc::Error) -> TransportError {
    match e {
        pcsc::Error::RemovedCard
        | pcsc::Error::ResetCard
        | pcsc::Error::NoSmartcard
        | pcsc::Error::UnpoweredCard
        | pcsc::Error::UnresponsiveCard
        | pcsc::Error::Timeout => TransportError::TagLost(format!("pcsc: {e}")),
        e => pcsc_err(e),
    }
}

/// Map a storage-card ATR to the anticollision answers a PN532 would
/// report for the same card.
fn atqa_sak_from_atr(atr: &[u8]) -> ([u8; 2], u8) {
    match atr.get(ATR_NAME_OFFSET..ATR_NAME_OFFSET + 2) {
        Some(name) if name == CARD_NAME_MIFARE_1K => ([0x00, 0x04], 0x08),
        Some(name) if name == CARD_NAME_ULTRALIGHT => ([0x00, 0x44], 0x00),
        _ => ([0x00, 0x00], 0x00),
    }
}

fn transmit(card: &Card, apdu: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut buf = [0u8; pcsc::MAX_BUFFER_SIZE];
    let resp = card.transmit(apdu, &mut buf).map_err(card_err)?;
    match resp.split_last_chunk::<2>() {
        Some((data, sw)) if *sw == SW_OK => Ok(data.to_vec()),
        Some((_, sw)) => Err(TransportError::TagLost(format!(
            "card answered {:02x}{:02x}",
            sw[0], sw[1]
        ))),
        None => Err(TransportError::TagLost("empty card answer".into())),
    }
}

/// Card connection and identity of the tag currently in the field.
struct Present {
    card: Card,
    tag: DiscoveredTag,
}

type CardSlot = Arc<Mutex<Option<Present>>>;

/// Radio backend over the platform PC/SC service.
pub struct PcscBackend {
    reader: Option<CString>,
    card: CardSlot,
    running: Arc<AtomicBool>,
}

impl PcscBackend {
    /// Use the first reader PC/SC reports.
    pub fn new() -> Self {
        Self {
            reader: None,
            card: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use a specific reader by name.
    pub fn with_reader(name: &str) -> Result<Self, TransportError> {
        let reader = CString::new(name)
            .map_err(|_| TransportError::Unavailable("reader name contains NUL".into()))?;
        Ok(Self {
            reader: Some(reader),
            ..Self::new()
        })
    }

    /// Names of the PC/SC readers currently attached.
    pub fn list_readers() -> Result<Vec<String>, TransportError> {
        let ctx = Context::establish(Scope::User).map_err(pcsc_err)?;
        let readers = ctx.list_readers_owned().map_err(pcsc_err)?;
        Ok(readers
            .into_iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect())
    }

    async fn with_card<T, F>(&self, f: F) -> Result<T, TransportError>
    where
        F: FnOnce(&Card) -> Result<T, TransportError> + Send + 'static,
        T: Send + 'static,
    {
        let card = self.card.clone();
        tokio::task::spawn_blocking(move || {
            let guard = card
                .lock()
                .map_err(|_| TransportError::Unavailable("pcsc card lock poisoned".into()))?;
            match guard.as_ref() {
                Some(present) => f(&present.card),
                None => Err(TransportError::TagLost("no card in field".into())),
            }
        })
        .await
        .map_err(|e| TransportError::Unavailable(format!("pcsc worker failed: {e}")))?
    }
}

impl Default for PcscBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking monitor loop: waits for cards and reports each arrival.
fn monitor(
    ctx: Context,
    reader: CString,
    card_slot: CardSlot,
    running: Arc<AtomicBool>,
    events: mpsc::Sender<DiscoveredTag>,
) {
    let mut states = [ReaderState::new(reader, State::UNAWARE)];
    while running.load(Ordering::SeqCst) {
        match ctx.get_status_change(POLL_INTERVAL, &mut states) {
            Ok(()) => {}
            Err(pcsc::Error::Timeout) => continue,
            Err(e) => {
                warn!("pcsc monitor stopped: {}", e);
                break;
            }
        }

        let event = states[0].event_state();
        let was_present = states[0].current_state().contains(State::PRESENT);
        states[0].sync_current_state();

        if event.contains(State::EMPTY) {
            if let Ok(mut slot) = card_slot.lock() {
                *slot = None;
            }
            continue;
        }
        if !event.contains(State::PRESENT) || was_present {
            continue;
        }

        let (atqa, sak) = atqa_sak_from_atr(states[0].atr());
        let card = match ctx.connect(states[0].name(), ShareMode::Shared, Protocols::ANY) {
            Ok(c) => c,
            Err(e) => {
                debug!("pcsc connect failed: {}", e);
                continue;
            }
        };
        let uid = match transmit(&card, &[0xFF, 0xCA, 0x00, 0x00, 0x00]) {
            Ok(uid) => uid,
            Err(e) => {
                debug!("pcsc uid query failed: {}", e);
                continue;
            }
        };
        let tag = DiscoveredTag { uid, atqa, sak };
        if let Ok(mut slot) = card_slot.lock() {
            *slot = Some(Present {
                card,
                tag: tag.clone(),
            });
        }
        if events.blocking_send(tag).is_err() {
            break;
        }
    }
    running.store(false, Ordering::SeqCst);
}

#[async_trait]
impl RadioBackend for PcscBackend {
    async fn start(&mut self, events: mpsc::Sender<DiscoveredTag>) -> Result<(), TransportError> {
        let ctx = Context::establish(Scope::User).map_err(pcsc_err)?;
        let reader = match self.reader.clone() {
            Some(r) => r,
            None => ctx
                .list_readers_owned()
                .map_err(pcsc_err)?
                .into_iter()
                .next()
                .ok_or_else(|| TransportError::Unavailable("no PC/SC reader attached".into()))?,
        };
        debug!("pcsc monitoring {}", reader.to_string_lossy());

        self.running.store(true, Ordering::SeqCst);
        let card = self.card.clone();
        let running = self.running.clone();
        std::thread::Builder::new()
            .name("pcsc-monitor".into())
            .spawn(move || monitor(ctx, reader, card, running, events))?;
        Ok(())
    }

    async fn current_tag(&mut self) -> Result<Option<DiscoveredTag>, TransportError> {
        let slot = self
            .card
            .lock()
            .map_err(|_| TransportError::Unavailable("pcsc card lock poisoned".into()))?;
        Ok(slot.as_ref().map(|p| p.tag.clone()))
    }

    async fn read_pages(
        &mut self,
        _tag: &DiscoveredTag,
        page: u8,
    ) -> Result<Vec<u8>, TransportError> {
        self.with_card(move |card| transmit(card, &[0xFF, 0xB0, 0x00, page, 0x10]))
            .await
    }

    async fn write_page(
        &mut self,
        _tag: &DiscoveredTag,
        page: u8,
        data: &[u8],
    ) -> Result<(), TransportError> {
        let mut apdu = vec![0xFF, 0xD6, 0x00, page, data.len() as u8];
        apdu.extend_from_slice(data);
        self.with_card(move |card| transmit(card, &apdu).map(|_| ()))
            .await
    }

    async fn stop(&mut self) -> Result<(), TransportError> {
        self.running.store(false, Ordering::SeqCst);
        if let Ok(mut slot) = self.card.lock() {
            *slot = None;
        }
        Ok(())
    }
}
