// libpn532/src/constants.rs
//! Common protocol constants used across the crate

/// Lead byte sent before every frame start code.
pub const PN532_PREAMBLE: u8 = 0x00;

/// Frame start code: 0x00 0xFF
pub const PN532_START_CODE: [u8; 2] = [0x00, 0xFF];

/// Optional trailing byte after the data checksum.
pub const PN532_POSTAMBLE: u8 = 0x00;

/// Bytes surrounding the command id and payload:
/// preamble(1) + start code(2) + len(1) + lcs(1) + dcs(1)
pub const PN532_FRAME_OVERHEAD: usize = 6;

/// Largest value the normal-frame length byte may carry. 0xFF is reserved
/// for extended frames, which are not supported.
pub const PN532_MAX_FRAME_LEN: usize = 0xFE;

/// Largest payload (excluding the command id byte) a normal frame holds.
pub const PN532_MAX_PAYLOAD_LEN: usize = PN532_MAX_FRAME_LEN - 1;

/// ACK control frame
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// NACK control frame
pub const PN532_NACK: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];

/// Frame identifier (TFI) host->reader (D4) and reader->host (D5)
pub const PN532_HOST_TO_READER: u8 = 0xD4;
/// Reader-to-host TFI.
pub const PN532_READER_TO_HOST: u8 = 0xD5;

/// Frame identifier of the application-level error frame (00 00 FF 01 FF 7F 81)
pub const PN532_ERROR_FRAME_ID: u8 = 0x7F;

/// PN532 command codes. The reader answers with `code + 1`.
pub const PN532_CMD_GET_FIRMWARE_VERSION: u8 = 0x02;
/// SAMConfiguration
pub const PN532_CMD_SAM_CONFIGURATION: u8 = 0x14;
/// InDataExchange
pub const PN532_CMD_IN_DATA_EXCHANGE: u8 = 0x40;
/// InListPassiveTarget
pub const PN532_CMD_IN_LIST_PASSIVE_TARGET: u8 = 0x4A;

/// SAMConfiguration parameters: normal mode, 1 s virtual card timeout, use IRQ
pub const PN532_SAM_NORMAL_MODE: u8 = 0x01;
/// Virtual card timeout in 50 ms units.
pub const PN532_SAM_TIMEOUT: u8 = 0x14;
/// Drive the P70_IRQ pin.
pub const PN532_SAM_USE_IRQ: u8 = 0x01;

/// InListPassiveTarget: one target at 106 kbps type A
pub const PN532_MAX_TARGETS: u8 = 0x01;
/// Baud rate and modulation: 106 kbps type A.
pub const PN532_BRTY_106_TYPE_A: u8 = 0x00;

/// Logical number of the single listed target
pub const PN532_TARGET: u8 = 0x01;

/// Card-level (NTAG/Ultralight) READ and WRITE sub-commands carried by
/// InDataExchange
pub const CARD_CMD_READ: u8 = 0x30;
/// Card WRITE sub-command (one page).
pub const CARD_CMD_WRITE: u8 = 0xA2;

/// Bytes rousing a PN532 in HSU mode out of power-down
pub const PN532_WAKE_LEAD_IN: [u8; 16] = [
    0x55, 0x55, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

/// Default substring identifying a SAMConfiguration answer (D5 15)
pub const PN532_WAKE_ACK_MARKER: [u8; 2] = [PN532_READER_TO_HOST, PN532_CMD_SAM_CONFIGURATION + 1];

/// Size of one card memory page and of one writable block.
pub const PAGE_SIZE: usize = 4;
/// Bytes written by one WRITE.
pub const BLOCK_SIZE: usize = 4;

/// Bytes returned by a single READ (four consecutive pages)
pub const READ_RESPONSE_LEN: usize = 16;

/// First user-data page; pages 0..=3 hold serial, lock and capability bytes
pub const FIRST_DATA_PAGE: u8 = 4;

/// Default exclusive page ceiling for a full dump
pub const DEFAULT_PAGE_CEILING: u8 = 130;

/// In-band terminator marking the end of the meaningful dump
pub const PAGE_SENTINEL: u8 = 0xFE;

/// Dump lengths are padded to a multiple of this many bytes
pub const PAGE_ALIGNMENT: usize = 8;

/// Default serial line speed of a PN532 in HSU mode
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
