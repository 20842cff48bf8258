// libpn532/src/protocol/responses/mod.rs

/// InDataExchange answers.
pub mod data;
/// InListPassiveTarget answers.
pub mod identify;
/// SAMConfiguration and GetFirmwareVersion answers.
pub mod wake;

pub use data::decode_data_exchange;
pub use identify::decode_identify;
pub use wake::{decode_firmware, decode_wake};

use crate::card::CardIdentity;
use crate::constants::{PN532_ERROR_FRAME_ID, PN532_READER_TO_HOST};
use crate::protocol::commands::Command;
use crate::protocol::{parser, Frame};
use crate::types::FirmwareVersion;
use crate::ResponseError;

/// High-level Response enum. Per-command decoders live in
/// `protocol::responses::<name>.rs` and are dispatched here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// SAMConfiguration accepted.
    Wake,
    /// GetFirmwareVersion answer.
    Firmware(FirmwareVersion),
    /// `None` when no card answered the scan.
    CardId(Option<CardIdentity>),
    /// Raw bytes returned by a card READ (16 bytes, four pages).
    Data(Vec<u8>),
    /// WRITE accepted by the card.
    Written,
}

impl Response {
    /// Decode a reader->host frame answering `cmd`.
    pub fn decode(cmd: &Command, frame: &Frame) -> Result<Self, ResponseError> {
        match frame.command_id() {
            PN532_READER_TO_HOST => {}
            PN532_ERROR_FRAME_ID => {
                return Err(ResponseError::ReaderStatus(
                    frame.code().unwrap_or(PN532_ERROR_FRAME_ID),
                ));
            }
            actual => {
                return Err(ResponseError::UnexpectedResponse {
                    expected: PN532_READER_TO_HOST,
                    actual,
                });
            }
        }

        Self::decode_payload(cmd, frame.payload())
    }

    /// Decode a response payload (including response code) for `cmd`.
    pub fn decode_payload(cmd: &Command, data: &[u8]) -> Result<Self, ResponseError> {
        // Central check so the decoders never index an empty slice.
        parser::ensure_len(data, 1)?;
        parser::expect_response_code(data, cmd.response_code())?;

        match cmd {
            Command::WakeUp => decode_wake(data).map(|()| Self::Wake),
            Command::GetFirmwareVersion => decode_firmware(data).map(Self::Firmware),
            Command::GetCardId => decode_identify(data).map(Self::CardId),
            Command::ReadBlock { .. } => decode_data_exchange(data).map(Self::Data),
            Command::WriteBlock { .. } => decode_data_exchange(data).map(|_| Self::Written),
        }
    }

    /// Response code byte associated with this variant.
    pub fn response_code(&self) -> u8 {
        match self {
            Response::Wake => 0x15,
            Response::Firmware(_) => 0x03,
            Response::CardId(_) => 0x4B,
            Response::Data(_) | Response::Written => 0x41,
        }
    }

    /// Expect a `CardId` answer.
    pub fn into_card_id(self) -> Result<Option<CardIdentity>, ResponseError> {
        match self {
            Response::CardId(id) => Ok(id),
            other => Err(mismatch(0x4B, &other)),
        }
    }

    /// Pages returned by a READ.
    pub fn into_data(self) -> Result<Vec<u8>, ResponseError> {
        match self {
            Response::Data(bytes) => Ok(bytes),
            other => Err(mismatch(0x41, &other)),
        }
    }

    /// Expect a `Firmware` answer.
    pub fn into_firmware(self) -> Result<FirmwareVersion, ResponseError> {
        match self {
            Response::Firmware(fw) => Ok(fw),
            other => Err(mismatch(0x03, &other)),
        }
    }
}

fn mismatch(expected: u8, got: &Response) -> ResponseError {
    ResponseError::UnexpectedResponse {
        expected,
        actual: got.response_code(),
    }
}
