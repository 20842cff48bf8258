// libpn532/src/protocol/commands/data.rs

use crate::constants::{
    BLOCK_SIZE, CARD_CMD_READ, CARD_CMD_WRITE, PN532_CMD_IN_DATA_EXCHANGE, PN532_TARGET,
};
use crate::CommandError;

/// Encode an InDataExchange READ of one page.
/// Layout: command_code(1) + target(1) + READ(1) + page(1)
/// The card answers with 16 bytes: the requested page and the three after it.
pub fn encode_read_block(index: u8) -> Vec<u8> {
    vec![PN532_CMD_IN_DATA_EXCHANGE, PN532_TARGET, CARD_CMD_READ, index]
}

/// Encode an InDataExchange WRITE of one block.
/// Layout: command_code(1) + target(1) + WRITE(1) + page(1) + data(BLOCK_SIZE)
pub fn encode_write_block(index: u8, data: &[u8]) -> Result<Vec<u8>, CommandError> {
    if data.len() != BLOCK_SIZE {
        return Err(CommandError::InvalidBlockSize {
            expected: BLOCK_SIZE,
            actual: data.len(),
        });
    }

    let mut buf = Vec::with_capacity(4 + BLOCK_SIZE);
    buf.extend_from_slice(&[PN532_CMD_IN_DATA_EXCHANGE, PN532_TARGET, CARD_CMD_WRITE, index]);
    buf.extend_from_slice(data);
    Ok(buf)
}
