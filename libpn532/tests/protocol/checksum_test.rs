#[path = "../common/mod.rs"]
mod common;

use libpn532::protocol::{dcs, lcs};

#[test]
fn lcs_and_dcs_examples() {
    assert_eq!(lcs(4), 0xfc);
    assert_eq!(lcs(0), 0x00);
    assert_eq!(lcs(0xff), 0x01);

    assert_eq!(dcs(0x40, &[0x01, 0x30, 0x04]), 0x8b);
    assert_eq!(dcs(0xd4, &[0x02]), 0x2a);
    assert_eq!(dcs(0x00, &[]), 0x00);
}

#[test]
fn length_plus_lcs_is_zero() {
    for len in 0u8..=255 {
        assert_eq!(len.wrapping_add(lcs(len)), 0);
    }
}
