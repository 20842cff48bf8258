// libpn532/src/protocol/codec.rs

use crate::constants::{PN532_ACK, PN532_NACK, PN532_START_CODE};
use crate::protocol::checksum::lcs;
use crate::{CommandError, FrameError};

use super::commands::{Command, CommandBuilder};
use super::responses::Response;
use super::Frame;

/// One unit read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Positive acknowledgement of the last request.
    Ack,
    /// Negative acknowledgement.
    Nack,
    /// Normal information frame.
    Data(Frame),
}

/// Encode a Command into the bytes to write: lead-in (wake-up only)
/// followed by the full frame.
pub fn encode_request(cmd: &Command) -> Result<Vec<u8>, CommandError> {
    let frame = CommandBuilder::build(cmd)?;
    let lead_in = cmd.lead_in();
    let mut out = Vec::with_capacity(lead_in.len() + frame.payload().len() + 7);
    out.extend_from_slice(lead_in);
    out.extend_from_slice(&frame.to_bytes());
    Ok(out)
}

/// Bytes the host sends to acknowledge or abort a pending command.
pub fn ack_bytes() -> &'static [u8] {
    &PN532_ACK
}

/// Bytes asking the reader to repeat its last response.
pub fn nack_bytes() -> &'static [u8] {
    &PN532_NACK
}

/// Decode one complete frame and parse the response to `cmd`.
pub fn decode_response_frame(cmd: &Command, bytes: &[u8]) -> crate::Result<Response> {
    let frame = Frame::decode(bytes)?;
    Ok(Response::decode(cmd, &frame)?)
}

/// Find the next complete message in `buf`.
///
/// Returns the message and the number of bytes it consumed (including any
/// noise before the start code), or `None` when more bytes are needed.
pub fn next_message(buf: &[u8]) -> Result<Option<(Message, usize)>, FrameError> {
    let Some(idx) = buf.windows(2).position(|w| w == PN532_START_CODE) else {
        return Ok(None);
    };
    let s = idx + PN532_START_CODE.len();
    if buf.len() < s + 2 {
        return Ok(None);
    }

    match (buf[s], buf[s + 1]) {
        (0x00, 0xFF) => return Ok(Some((Message::Ack, s + 2))),
        (0xFF, 0x00) => return Ok(Some((Message::Nack, s + 2))),
        (len, len_cs) if lcs(len) != len_cs => {
            return Err(FrameError::LengthMismatch {
                expected: lcs(len_cs) as usize,
                actual: len as usize,
            });
        }
        _ => {}
    }

    let end = s + 2 + buf[s] as usize + 1;
    if buf.len() < end {
        return Ok(None);
    }
    let frame = Frame::decode(&buf[idx..end])?;
    Ok(Some((Message::Data(frame), end)))
}

/// Accumulates received chunks and yields messages as they complete.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    /// Empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete message. A malformed frame clears the buffer.
    pub fn next_message(&mut self) -> Result<Option<Message>, FrameError> {
        match next_message(&self.buf) {
            Ok(Some((msg, used))) => {
                self.buf.drain(..used);
                Ok(Some(msg))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.buf.clear();
                Err(e)
            }
        }
    }

    /// Bytes held but not yet decoded.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Drop buffered bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
