// libpn532/src/session/handle.rs

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, trace};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::card::CardIdentity;
use crate::constants::PAGE_SIZE;
use crate::protocol::codec::{self, FrameReader, Message};
use crate::protocol::{Command, Frame, Response};
use crate::session::config::SessionConfig;
use crate::session::events::{EventBus, SessionEvent};
use crate::session::pages::PageBuffer;
use crate::session::state::ConnectionState;
use crate::transport::{Transport, TransportSelector};
use crate::types::{BlockData, FirmwareVersion, TransportKind};
use crate::utils::{remaining, Hex};
use crate::{ConnectError, Error, ResponseError, Result, TransportError};

#[derive(Debug)]
struct Shared {
    state: ConnectionState,
    cancel: CancellationToken,
    identity: Option<CardIdentity>,
    pages: Option<PageBuffer>,
}

/// Marks one in-flight operation. Dropping it hands the session back to
/// `restore` unless a disconnect or a newer operation took over.
struct OpGuard<'a> {
    shared: &'a Mutex<Shared>,
    cancel: CancellationToken,
    op: ConnectionState,
    restore: ConnectionState,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        let mut s = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.cancel.is_cancelled() && s.state == self.op {
            s.state = self.restore;
        }
    }
}

/// Session with one card reader.
///
/// All methods take `&self`; share the session behind an `Arc`. Only one
/// operation runs at a time, a concurrent call fails with `Error::Busy`.
pub struct CardSession {
    config: SessionConfig,
    shared: Mutex<Shared>,
    transport: tokio::sync::Mutex<Option<Box<dyn Transport>>>,
    selector: Mutex<TransportSelector>,
    events: EventBus,
}

impl CardSession {
    /// Session whose transport comes from `config.serial_port`.
    pub fn new(config: SessionConfig) -> Self {
        crate::session::SessionBuilder::new().with_config(config).build()
    }

    /// Start configuring a session.
    pub fn builder() -> crate::session::SessionBuilder {
        crate::session::SessionBuilder::new()
    }

    pub(crate) fn from_parts(
        config: SessionConfig,
        selector: TransportSelector,
        transport: Option<Box<dyn Transport>>,
    ) -> Self {
        let events = EventBus::new(config.event_capacity);
        Self {
            config,
            shared: Mutex::new(Shared {
                state: ConnectionState::Disconnected,
                cancel: CancellationToken::new(),
                identity: None,
                pages: None,
            }),
            transport: tokio::sync::Mutex::new(transport),
            selector: Mutex::new(selector),
            events,
        }
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Settings the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.shared().state
    }

    /// Identity from the last successful scan that found a card.
    pub fn last_identity(&self) -> Option<CardIdentity> {
        self.shared().identity.clone()
    }

    /// Buffer of the last completed `read_all_pages`.
    pub fn last_pages(&self) -> Option<PageBuffer> {
        self.shared().pages.clone()
    }

    /// Receive every status line the session emits from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Kind of the transport in use, if one was chosen already.
    pub async fn transport_kind(&self) -> Option<TransportKind> {
        self.transport.lock().await.as_ref().map(|t| t.kind())
    }

    fn begin(&self, op: ConnectionState) -> Result<OpGuard<'_>> {
        let mut s = self.shared();
        match s.state {
            ConnectionState::Ready => {
                s.state = op;
                Ok(OpGuard {
                    shared: &self.shared,
                    cancel: s.cancel.clone(),
                    op,
                    restore: ConnectionState::Ready,
                })
            }
            ConnectionState::Disconnected => Err(ConnectError::NotConnected.into()),
            state => Err(Error::Busy { state }),
        }
    }

    fn begin_connect(&self) -> Result<OpGuard<'_>> {
        let mut s = self.shared();
        match s.state {
            ConnectionState::Disconnected => {
                s.state = ConnectionState::Connecting;
                s.cancel = CancellationToken::new();
                Ok(OpGuard {
                    shared: &self.shared,
                    cancel: s.cancel.clone(),
                    op: ConnectionState::Connecting,
                    restore: ConnectionState::Disconnected,
                })
            }
            ConnectionState::Ready => Err(ConnectError::AlreadyConnected.into()),
            state => Err(Error::Busy { state }),
        }
    }

    /// Pick a transport (once), open it and wake the reader.
    pub async fn connect(&self) -> Result<()> {
        let op = self.begin_connect()?;
        {
            let mut slot = self.transport.lock().await;
            if slot.is_none() {
                let picked = self
                    .selector
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .select();
                match picked {
                    Ok(t) => *slot = Some(t),
                    Err(e) => {
                        self.events.error(format!("connect failed: {e}"));
                        return Err(e.into());
                    }
                }
            }
        }
        self.bring_up(op).await
    }

    /// Connect over a caller-supplied transport, replacing any idle one.
    pub async fn connect_with(&self, transport: Box<dyn Transport>) -> Result<()> {
        let op = self.begin_connect()?;
        *self.transport.lock().await = Some(transport);
        self.bring_up(op).await
    }

    async fn bring_up(&self, op: OpGuard<'_>) -> Result<()> {
        let woke = tokio::select! {
            _ = op.cancel.cancelled() => Err(ConnectError::Transport(TransportError::Cancelled)),
            res = self.wake() => res,
        };

        if let Err(e) = woke {
            self.events.error(format!("connect failed: {e}"));
            if !op.cancel.is_cancelled() {
                self.close_transport().await;
            }
            return Err(e.into());
        }

        let firmware = match self
            .exchange(&op.cancel, &Command::GetFirmwareVersion, self.config.read_timeout)
            .await
            .and_then(|f| Ok(Response::decode(&Command::GetFirmwareVersion, &f)?.into_firmware()?))
        {
            Ok(fw) => format!(" ({fw})"),
            Err(e) => {
                debug!("firmware query failed: {}", e);
                String::new()
            }
        };

        {
            let mut s = self.shared();
            if op.cancel.is_cancelled() {
                return Err(TransportError::Cancelled.into());
            }
            s.state = ConnectionState::Ready;
        }
        let kind = self.transport_kind().await.map(|k| k.to_string());
        self.events.info(format!(
            "reader ready over {}{}",
            kind.as_deref().unwrap_or("unknown transport"),
            firmware
        ));
        Ok(())
    }

    /// Open the transport, send the wake-up sequence and wait for the
    /// acknowledgement marker in the raw answer.
    async fn wake(&self) -> std::result::Result<(), ConnectError> {
        let mut slot = self.transport.lock().await;
        let t = slot.as_mut().ok_or(ConnectError::NoTransport)?;
        t.connect().await?;

        let request = codec::encode_request(&Command::WakeUp)
            .map_err(|_| ConnectError::NoAck)?;
        trace!(">> {}", Hex(&request));
        t.send(&request).await?;

        let marker = &self.config.ack_marker;
        let deadline = Instant::now() + self.config.connect_timeout;
        let mut raw = Vec::new();
        loop {
            if marker.is_empty() || raw.windows(marker.len()).any(|w| w == marker.as_slice()) {
                return Ok(());
            }
            let Some(left) = remaining(deadline) else {
                return Err(ConnectError::NoAck);
            };
            match t.receive(left).await {
                Ok(chunk) => {
                    trace!("<< {}", Hex(&chunk));
                    raw.extend_from_slice(&chunk);
                }
                Err(TransportError::Timeout) => return Err(ConnectError::NoAck),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Cancel whatever is in flight and close the transport. Safe to call
    /// in any state, any number of times.
    pub async fn disconnect(&self) {
        let was = {
            let mut s = self.shared();
            s.cancel.cancel();
            let was = s.state;
            s.state = ConnectionState::Disconnected;
            s.identity = None;
            was
        };
        self.close_transport().await;
        if was != ConnectionState::Disconnected {
            self.events.info("reader disconnected");
        }
    }

    async fn close_transport(&self) {
        let mut slot = self.transport.lock().await;
        if let Some(t) = slot.as_mut() {
            if let Err(e) = t.disconnect().await {
                debug!("transport close failed: {}", e);
            }
        }
    }

    /// Drop to `Disconnected` when `err` leaves the reader unusable.
    async fn settle(&self, err: Error) -> Error {
        if err.is_fatal() {
            self.events.error(format!("reader lost: {err}"));
            self.disconnect().await;
        }
        err
    }

    /// Send one command and wait for its answer frame, skipping the ACK the
    /// reader sends first.
    async fn exchange(
        &self,
        cancel: &CancellationToken,
        cmd: &Command,
        timeout: Duration,
    ) -> Result<Frame> {
        let request = codec::encode_request(cmd)?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled.into()),
            res = async {
                let mut slot = self.transport.lock().await;
                let t = slot.as_mut().ok_or(TransportError::NotConnected)?;
                round_trip(t.as_mut(), &request, timeout).await
            } => res,
        }
    }

    async fn request(&self, cancel: &CancellationToken, cmd: &Command, timeout: Duration) -> Result<Response> {
        let frame = self.exchange(cancel, cmd, timeout).await?;
        Ok(Response::decode(cmd, &frame)?)
    }

    /// Tell the reader to drop a command still waiting for a card.
    async fn abort_pending(&self) {
        let mut slot = self.transport.lock().await;
        if let Some(t) = slot.as_mut() {
            if let Err(e) = t.send(codec::ack_bytes()).await {
                debug!("abort failed: {}", e);
            }
        }
    }

    /// Look for a card in the field. `Ok(None)` when none answers within
    /// the scan timeout.
    pub async fn scan(&self) -> Result<Option<CardIdentity>> {
        let op = self.begin(ConnectionState::Scanning)?;
        let cmd = Command::GetCardId;

        let found = match self.request(&op.cancel, &cmd, self.config.scan_timeout).await {
            Ok(resp) => resp.into_card_id().map_err(Error::from),
            Err(e) if e.is_timeout() => {
                self.abort_pending().await;
                Ok(None)
            }
            Err(e) => Err(e),
        };

        match found {
            Ok(Some(id)) => {
                self.events.info(format!("card detected: {id}"));
                self.shared().identity = Some(id.clone());
                Ok(Some(id))
            }
            Ok(None) => {
                self.events.info("no card in field");
                Ok(None)
            }
            Err(e) => {
                self.events.error(format!("scan failed: {e}"));
                Err(self.settle(e).await)
            }
        }
    }

    async fn read_page(&self, cancel: &CancellationToken, page: u8) -> Result<Vec<u8>> {
        let cmd = Command::ReadBlock { block_index: page };
        let data = self
            .request(cancel, &cmd, self.config.read_timeout)
            .await?
            .into_data()?;
        if data.len() < PAGE_SIZE {
            return Err(ResponseError::Truncated {
                expected: PAGE_SIZE,
                actual: data.len(),
            }
            .into());
        }
        Ok(data)
    }

    /// Dump the card from `first_page` until the sentinel or the page
    /// ceiling. A failed page ends the dump with `Error::PartialRead`.
    pub async fn read_all_pages(&self) -> Result<PageBuffer> {
        let op = self.begin(ConnectionState::Reading)?;
        let first = self.config.first_page;
        let mut buf = PageBuffer::new(first);

        for page in first..self.config.page_ceiling {
            if page != first && !self.config.inter_page_delay.is_zero() {
                tokio::select! {
                    _ = op.cancel.cancelled() => {
                        return Err(self.partial(buf, TransportError::Cancelled.into()).await);
                    }
                    _ = tokio::time::sleep(self.config.inter_page_delay) => {}
                }
            }

            match self.read_page(&op.cancel, page).await {
                Ok(data) => {
                    trace!("page {}: {}", page, Hex(&data[..PAGE_SIZE]));
                    if buf.push_page(&data) {
                        break;
                    }
                }
                Err(e) => return Err(self.partial(buf, e).await),
            }
        }

        if buf.is_terminated() {
            self.events
                .info(format!("read {} bytes from {} pages", buf.len(), buf.page_count()));
        } else {
            self.events.warn(format!(
                "no end marker before page {}; read {} bytes",
                self.config.page_ceiling,
                buf.len()
            ));
        }
        self.shared().pages = Some(buf.clone());
        Ok(buf)
    }

    async fn partial(&self, pages: PageBuffer, source: Error) -> Error {
        self.events.error(format!(
            "read failed at page {} after {} bytes: {source}",
            pages.next_page(),
            pages.len()
        ));
        let source = self.settle(source).await;
        Error::PartialRead {
            pages,
            source: Box::new(source),
        }
    }

    /// Write one page. `data` must be exactly one block; anything else is
    /// rejected before the reader is touched.
    pub async fn write_page(&self, index: u8, data: &[u8]) -> Result<()> {
        let block = BlockData::try_from(data)?;
        let op = self.begin(ConnectionState::Writing)?;
        let cmd = Command::WriteBlock {
            block_index: index,
            data: block.as_bytes().to_vec(),
        };

        match self.request(&op.cancel, &cmd, self.config.read_timeout).await {
            Ok(Response::Written) => {
                self.events.info(format!("wrote page {index}: {}", block.to_hex()));
                Ok(())
            }
            Ok(other) => Err(ResponseError::UnexpectedResponse {
                expected: cmd.response_code(),
                actual: other.response_code(),
            }
            .into()),
            Err(e) => {
                self.events.error(format!("write of page {index} failed: {e}"));
                Err(self.settle(e).await)
            }
        }
    }

    /// Ask the reader for its chip and firmware revision.
    pub async fn firmware_version(&self) -> Result<FirmwareVersion> {
        let op = self.begin(ConnectionState::Reading)?;
        let cmd = Command::GetFirmwareVersion;
        match self.request(&op.cancel, &cmd, self.config.read_timeout).await {
            Ok(resp) => Ok(resp.into_firmware()?),
            Err(e) => Err(self.settle(e).await),
        }
    }
}

/// Send `request` and return the first data frame that follows its ACK.
/// Anything arriving before the ACK answers an earlier command and is
/// dropped.
async fn round_trip(t: &mut dyn Transport, request: &[u8], timeout: Duration) -> Result<Frame> {
    t.clear_input().await?;
    trace!(">> {}", Hex(request));
    t.send(request).await?;

    let deadline = Instant::now() + timeout;
    let mut reader = FrameReader::new();
    let mut acked = false;
    loop {
        while let Some(msg) = reader.next_message()? {
            match msg {
                Message::Ack => {
                    trace!("<< ack");
                    acked = true;
                }
                Message::Nack if acked => return Err(ResponseError::Nack.into()),
                Message::Data(frame) if acked => return Ok(frame),
                Message::Nack => trace!("<< stale nack dropped"),
                Message::Data(frame) => {
                    trace!("<< stale frame dropped: {}", Hex(frame.payload()))
                }
            }
        }
        let left = remaining(deadline).ok_or(TransportError::Timeout)?;
        let chunk = t.receive(left).await?;
        trace!("<< {}", Hex(&chunk));
        reader.push(&chunk);
    }
}
