// libpn532/src/protocol/checksum.rs

/// Compute Length Checksum (LCS)
/// LCS = 0x100 - length (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute Data Checksum (DCS) over the command id and payload
/// DCS = 0x100 - ((command_id + sum(payload)) & 0xff)
pub fn dcs(command_id: u8, payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .fold(command_id, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// True when `command_id + payload + checksum` sums to zero mod 256.
pub fn verify_dcs(command_id: u8, payload: &[u8], checksum: u8) -> bool {
    dcs(command_id, payload) == checksum
}
