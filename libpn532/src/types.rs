// libpn532/src/types.rs

use crate::constants::BLOCK_SIZE;
use crate::CommandError;
use derive_more::Display;
use std::convert::TryFrom;

/// UID - Newtype Pattern (4, 7 or 10 bytes for ISO 14443-A)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Wrap raw UID bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of UID bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length UID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

/// ATQA (SENS_RES), kept in the byte order the reader reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atqa([u8; 2]);

impl Atqa {
    /// Wrap the two ATQA bytes.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// Big-endian value.
    pub fn as_u16(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }
}

/// Card family inferred from ATQA/SAK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    /// NTAG215 (ATQA 00 44, SAK 00).
    #[display(fmt = "NTAG215")]
    Ntag215,
    /// MIFARE Classic 1K (ATQA 00 04, SAK 08).
    #[display(fmt = "MIFARE Classic 1K")]
    MifareClassic1K,
    /// Anything else.
    #[display(fmt = "unknown")]
    Unknown,
}

impl CardType {
    /// Infer the card family from the anticollision answers.
    pub fn infer(atqa: Atqa, sak: u8) -> Self {
        match (atqa.as_u16(), sak) {
            (0x0044, 0x00) => CardType::Ntag215,
            (0x0004, 0x08) => CardType::MifareClassic1K,
            _ => CardType::Unknown,
        }
    }
}

/// BlockData (4 バイト): one writable page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    /// Wrap one block.
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = CommandError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; BLOCK_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CommandError::InvalidBlockSize {
                    expected: BLOCK_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }
}

/// Reader firmware details reported by GetFirmwareVersion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "PN5{:02x} v{}.{}", ic, version, revision)]
pub struct FirmwareVersion {
    /// IC type, 0x32 for a PN532.
    pub ic: u8,
    /// Firmware version.
    pub version: u8,
    /// Firmware revision.
    pub revision: u8,
    /// Supported protocols bitmap.
    pub support: u8,
}

/// Which physical channel a transport drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportKind {
    /// USB serial reader.
    #[display(fmt = "serial")]
    Serial,
    /// Native radio backend.
    #[display(fmt = "radio")]
    Radio,
    /// Scripted transport used in tests.
    #[display(fmt = "mock")]
    Mock,
}
