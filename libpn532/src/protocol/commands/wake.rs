// libpn532/src/protocol/commands/wake.rs

use crate::constants::{
    PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_SAM_CONFIGURATION, PN532_SAM_NORMAL_MODE,
    PN532_SAM_TIMEOUT, PN532_SAM_USE_IRQ,
};

/// Encode the SAMConfiguration payload used to wake the reader.
/// Layout: command_code(1) + mode(1) + timeout(1) + irq(1)
///
/// A reader in HSU power-down only answers once the wake lead-in
/// (`Command::lead_in`) precedes this frame on the line.
pub fn encode_wake_up() -> Vec<u8> {
    vec![
        PN532_CMD_SAM_CONFIGURATION,
        PN532_SAM_NORMAL_MODE,
        PN532_SAM_TIMEOUT,
        PN532_SAM_USE_IRQ,
    ]
}

/// Encode GetFirmwareVersion (command code 0x02, no parameters)
pub fn encode_get_firmware_version() -> Vec<u8> {
    vec![PN532_CMD_GET_FIRMWARE_VERSION]
}
