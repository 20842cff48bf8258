// libpn532/src/card/mod.rs

use crate::types::{Atqa, CardType, Uid};
use std::fmt;

/// Identity of the card currently in the field, as reported by the
/// anticollision loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardIdentity {
    uid: Uid,
    atqa: Atqa,
    sak: u8,
    inferred_type: CardType,
}

impl CardIdentity {
    /// Build an identity and infer the card type from ATQA and SAK.
    pub fn new(uid: Uid, atqa: Atqa, sak: u8) -> Self {
        Self {
            inferred_type: CardType::infer(atqa, sak),
            uid,
            atqa,
            sak,
        }
    }

    /// Card serial number.
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Answer to request, type A.
    pub fn atqa(&self) -> Atqa {
        self.atqa
    }

    /// Select acknowledge byte.
    pub fn sak(&self) -> u8 {
        self.sak
    }

    /// Card type guessed from ATQA and SAK.
    pub fn inferred_type(&self) -> CardType {
        self.inferred_type
    }
}

impl fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} uid={} atqa={:04x} sak={:02x}",
            self.inferred_type,
            self.uid.to_hex(),
            self.atqa.as_u16(),
            self.sak
        )
    }
}
