// libpn532/src/protocol/frame.rs

use crate::constants::{
    PN532_FRAME_OVERHEAD, PN532_MAX_FRAME_LEN, PN532_MAX_PAYLOAD_LEN, PN532_POSTAMBLE,
    PN532_PREAMBLE, PN532_START_CODE,
};
use crate::protocol::checksum::{dcs, lcs};
use crate::FrameError;

/// One wire-level reader message.
/// Format: [Preamble(1)] [StartCode(2)] [Len(1)] [LCS(1)] [CommandId(1)] [Payload(n)] [DCS(1)]
/// Preamble: 0x00, StartCode: 0x00 0xFF
/// Len counts the command id plus the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    preamble: [u8; 2],
    length: u8,
    length_checksum: u8,
    command_id: u8,
    payload: Vec<u8>,
    checksum: u8,
}

impl Frame {
    /// Build a frame, deriving length and both checksums.
    pub fn new(command_id: u8, payload: Vec<u8>) -> Result<Self, FrameError> {
        if payload.len() > PN532_MAX_PAYLOAD_LEN {
            return Err(FrameError::LengthMismatch {
                expected: PN532_MAX_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        let length = (payload.len() + 1) as u8;
        Ok(Self {
            preamble: PN532_START_CODE,
            length,
            length_checksum: lcs(length),
            command_id,
            checksum: dcs(command_id, &payload),
            payload,
        })
    }

    /// Encode a command id and payload into full wire bytes
    pub fn encode(command_id: u8, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
        Ok(Self::new(command_id, payload.to_vec())?.to_bytes())
    }

    /// Serialize this frame. No postamble is emitted.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PN532_FRAME_OVERHEAD + self.length as usize);
        out.push(PN532_PREAMBLE);
        out.extend_from_slice(&self.preamble);
        out.push(self.length);
        out.push(self.length_checksum);
        out.push(self.command_id);
        out.extend_from_slice(&self.payload);
        out.push(self.checksum);
        out
    }

    /// Decode one complete frame. The leading 0x00 preamble byte and a
    /// single trailing 0x00 postamble are both optional.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let start = start_code_offset(bytes)?;
        let header_end = start + 2;
        if bytes.len() < header_end {
            return Err(FrameError::Truncated {
                needed: header_end,
                available: bytes.len(),
            });
        }

        let length = bytes[start];
        let length_checksum = bytes[start + 1];
        if lcs(length) != length_checksum {
            // The length checksum declares a different length than the
            // length byte carries.
            return Err(FrameError::LengthMismatch {
                expected: lcs(length_checksum) as usize,
                actual: length as usize,
            });
        }

        // Len 0 is an ACK and 0xFF marks NACK/extended frames; neither is a
        // data frame.
        if length == 0 || length as usize > PN532_MAX_FRAME_LEN {
            return Err(FrameError::LengthMismatch {
                expected: PN532_MAX_FRAME_LEN,
                actual: length as usize,
            });
        }

        let body_end = header_end + length as usize;
        let needed = body_end + 1;
        if bytes.len() < needed {
            return Err(FrameError::Truncated {
                needed,
                available: bytes.len(),
            });
        }

        let trailing = &bytes[needed..];
        if !(trailing.is_empty() || trailing == [PN532_POSTAMBLE]) {
            return Err(FrameError::LengthMismatch {
                expected: needed,
                actual: bytes.len(),
            });
        }

        let command_id = bytes[header_end];
        let payload = &bytes[header_end + 1..body_end];
        let actual = bytes[body_end];
        let expected = dcs(command_id, payload);
        if actual != expected {
            return Err(FrameError::ChecksumMismatch { expected, actual });
        }

        Ok(Self {
            preamble: PN532_START_CODE,
            length,
            length_checksum,
            command_id,
            payload: payload.to_vec(),
            checksum: actual,
        })
    }

    /// Start code `00 FF`.
    pub fn preamble(&self) -> [u8; 2] {
        self.preamble
    }

    /// LEN byte: TFI plus payload length.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// LCS byte.
    pub fn length_checksum(&self) -> u8 {
        self.length_checksum
    }

    /// TFI byte.
    pub fn command_id(&self) -> u8 {
        self.command_id
    }

    /// Bytes after the TFI, starting with the command code.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// DCS byte.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// First payload byte: the PN532 command or response code.
    pub fn code(&self) -> Option<u8> {
        self.payload.first().copied()
    }
}

/// Offset of the byte following the start code. Accepts `00 00 FF` and a
/// bare `00 FF`.
fn start_code_offset(bytes: &[u8]) -> Result<usize, FrameError> {
    const FULL: [u8; 3] = [PN532_PREAMBLE, PN532_START_CODE[0], PN532_START_CODE[1]];

    if bytes.starts_with(&FULL) {
        Ok(FULL.len())
    } else if bytes.starts_with(&PN532_START_CODE) {
        Ok(PN532_START_CODE.len())
    } else if FULL.starts_with(bytes) {
        Err(FrameError::Truncated {
            needed: PN532_FRAME_OVERHEAD,
            available: bytes.len(),
        })
    } else {
        Err(FrameError::BadPreamble)
    }
}
