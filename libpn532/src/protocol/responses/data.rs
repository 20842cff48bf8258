// libpn532/src/protocol/responses/data.rs

use crate::constants::PN532_CMD_IN_DATA_EXCHANGE;
use crate::protocol::parser;
use crate::ResponseError;

/// Error bits of the InDataExchange status byte; bits 6/7 are the MI and
/// NAD flags.
const STATUS_ERROR_MASK: u8 = 0x3F;

/// Decode an InDataExchange answer (response code = 0x41) and return the
/// bytes the card sent back.
/// Layout: response_code(1) + status(1) + data(n)
pub fn decode_data_exchange(data: &[u8]) -> Result<Vec<u8>, ResponseError> {
    parser::expect_response_code(data, PN532_CMD_IN_DATA_EXCHANGE + 1)?;

    let status = parser::byte_at(data, 1)?;
    if status & STATUS_ERROR_MASK != 0 {
        return Err(ResponseError::ReaderStatus(status));
    }

    Ok(data[2..].to_vec())
}
