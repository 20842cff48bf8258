// libpn532/src/protocol/commands/mod.rs

/// ReadBlock and WriteBlock encoders.
pub mod data;
/// GetCardId encoder.
pub mod identify;
/// WakeUp and GetFirmwareVersion encoders.
pub mod wake;

pub use data::{encode_read_block, encode_write_block};
pub use identify::encode_get_card_id;
pub use wake::{encode_get_firmware_version, encode_wake_up};

use crate::constants::{
    PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_IN_DATA_EXCHANGE, PN532_CMD_IN_LIST_PASSIVE_TARGET,
    PN532_CMD_SAM_CONFIGURATION, PN532_HOST_TO_READER, PN532_MAX_PAYLOAD_LEN, PN532_WAKE_LEAD_IN,
};
use crate::protocol::Frame;
use crate::CommandError;

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// SAMConfiguration preceded by the HSU wake-up preamble.
    WakeUp,
    /// GetFirmwareVersion
    GetFirmwareVersion,
    /// InListPassiveTarget for one type A target.
    GetCardId,
    /// READ of four pages starting at `block_index`.
    ReadBlock {
        /// First page to read.
        block_index: u8,
    },
    /// WRITE of one 4-byte page.
    WriteBlock {
        /// Page to write.
        block_index: u8,
        /// Exactly `BLOCK_SIZE` bytes.
        data: Vec<u8>,
    },
}

impl Command {
    /// PN532 command code carried as the first payload byte.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::WakeUp => PN532_CMD_SAM_CONFIGURATION,
            Self::GetFirmwareVersion => PN532_CMD_GET_FIRMWARE_VERSION,
            Self::GetCardId => PN532_CMD_IN_LIST_PASSIVE_TARGET,
            Self::ReadBlock { .. } | Self::WriteBlock { .. } => PN532_CMD_IN_DATA_EXCHANGE,
        }
    }

    /// Response code the reader answers with (command code + 1).
    pub fn response_code(&self) -> u8 {
        self.command_code().wrapping_add(1)
    }

    /// Bytes that must precede the frame on the wire.
    pub fn lead_in(&self) -> &'static [u8] {
        match self {
            Self::WakeUp => &PN532_WAKE_LEAD_IN,
            _ => &[],
        }
    }

    /// Encode the command into the frame payload (command code + params).
    pub fn encode(&self) -> Result<Vec<u8>, CommandError> {
        match self {
            Self::WakeUp => Ok(encode_wake_up()),
            Self::GetFirmwareVersion => Ok(encode_get_firmware_version()),
            Self::GetCardId => Ok(encode_get_card_id()),
            Self::ReadBlock { block_index } => Ok(encode_read_block(*block_index)),
            Self::WriteBlock { block_index, data } => encode_write_block(*block_index, data),
        }
    }
}

/// Turns semantic commands into host->reader frames.
pub struct CommandBuilder;

impl CommandBuilder {
    /// Frame for any `Command`.
    pub fn build(cmd: &Command) -> Result<Frame, CommandError> {
        host_frame(cmd.encode()?)
    }

    /// SAMConfiguration in normal mode.
    pub fn wake_up() -> Result<Frame, CommandError> {
        host_frame(encode_wake_up())
    }

    /// GetFirmwareVersion.
    pub fn get_firmware_version() -> Result<Frame, CommandError> {
        host_frame(encode_get_firmware_version())
    }

    /// InListPassiveTarget for one ISO 14443-A target.
    pub fn get_card_id() -> Result<Frame, CommandError> {
        host_frame(encode_get_card_id())
    }

    /// Card READ of the four pages starting at `index`.
    pub fn read_block(index: u8) -> Result<Frame, CommandError> {
        host_frame(encode_read_block(index))
    }

    /// Fails before any I/O when `data` is not exactly one block.
    pub fn write_block(index: u8, data: &[u8]) -> Result<Frame, CommandError> {
        host_frame(encode_write_block(index, data)?)
    }
}

fn host_frame(payload: Vec<u8>) -> Result<Frame, CommandError> {
    let actual = payload.len();
    Frame::new(PN532_HOST_TO_READER, payload).map_err(|_| CommandError::PayloadTooLong {
        max: PN532_MAX_PAYLOAD_LEN,
        actual,
    })
}
