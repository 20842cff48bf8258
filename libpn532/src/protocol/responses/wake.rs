// libpn532/src/protocol/responses/wake.rs

use crate::constants::{PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_SAM_CONFIGURATION};
use crate::protocol::parser;
use crate::types::FirmwareVersion;
use crate::ResponseError;

/// Decode a SAMConfiguration answer (response code = 0x15, no data)
pub fn decode_wake(data: &[u8]) -> Result<(), ResponseError> {
    parser::expect_response_code(data, PN532_CMD_SAM_CONFIGURATION + 1)
}

/// Decode a GetFirmwareVersion answer (response code = 0x03)
/// Layout: response_code(1) + ic(1) + ver(1) + rev(1) + support(1)
pub fn decode_firmware(data: &[u8]) -> Result<FirmwareVersion, ResponseError> {
    parser::expect_response_code(data, PN532_CMD_GET_FIRMWARE_VERSION + 1)?;
    let [ic, version, revision, support] = parser::array_at::<4>(data, 1)?;
    Ok(FirmwareVersion {
        ic,
        version,
        revision,
        support,
    })
}
