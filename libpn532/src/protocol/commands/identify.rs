// libpn532/src/protocol/commands/identify.rs

use crate::constants::{PN532_BRTY_106_TYPE_A, PN532_CMD_IN_LIST_PASSIVE_TARGET, PN532_MAX_TARGETS};

/// Encode InListPassiveTarget for a single 106 kbps type A target.
/// Layout: command_code(1) + max_targets(1) + brty(1)
pub fn encode_get_card_id() -> Vec<u8> {
    vec![
        PN532_CMD_IN_LIST_PASSIVE_TARGET,
        PN532_MAX_TARGETS,
        PN532_BRTY_106_TYPE_A,
    ]
}
