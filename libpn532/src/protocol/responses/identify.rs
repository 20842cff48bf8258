// libpn532/src/protocol/responses/identify.rs

use crate::card::CardIdentity;
use crate::constants::PN532_CMD_IN_LIST_PASSIVE_TARGET;
use crate::protocol::parser;
use crate::types::{Atqa, Uid};
use crate::ResponseError;

/// Decode an InListPassiveTarget answer for a type A target
/// (response code = 0x4B). `None` means no card answered.
/// Layout: response_code(1) + nb_tg(1) + tg(1) + atqa(2) + sak(1) + uid_len(1) + uid(n) [+ ats]
pub fn decode_identify(data: &[u8]) -> Result<Option<CardIdentity>, ResponseError> {
    parser::expect_response_code(data, PN532_CMD_IN_LIST_PASSIVE_TARGET + 1)?;

    let nb_tg = parser::byte_at(data, 1)?;
    if nb_tg == 0 {
        return Ok(None);
    }

    let atqa = Atqa::from_bytes(parser::array_at::<2>(data, 3)?);
    let sak = parser::byte_at(data, 5)?;
    let uid_len = parser::byte_at(data, 6)? as usize;
    let uid = parser::slice_at(data, 7, uid_len)?;

    Ok(Some(CardIdentity::new(
        Uid::from_bytes(uid.to_vec()),
        atqa,
        sak,
    )))
}
