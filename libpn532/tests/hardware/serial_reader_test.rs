#[path = "common.rs"]
mod common;

use libpn532::{ConnectionState, Result};
use serial_test::serial;

// These tests require a PN532 on the port named by PN532_PORT. Run
// manually with:
//
// PN532_PORT=/dev/ttyUSB0 cargo test -p libpn532 --test hardware -- --ignored

#[tokio::test]
#[ignore]
#[serial]
async fn wake_and_query_firmware() -> Result<()> {
    let Some(session) = common::open_reader().await? else {
        return Ok(());
    };
    assert_eq!(session.state(), ConnectionState::Ready);
    let fw = session.firmware_version().await?;
    assert_eq!(fw.ic, 0x32);
    session.disconnect().await;
    Ok(())
}

#[tokio::test]
#[ignore]
#[serial]
async fn dump_card_in_field() -> Result<()> {
    let Some(session) = common::open_reader().await? else {
        return Ok(());
    };
    if let Some(card) = session.scan().await? {
        println!("found {card}");
        let pages = session.read_all_pages().await?;
        assert_eq!(pages.len() % 8, 0);
        println!("{}", libpn532::bytes_to_hex_spaced(&pages.to_bytes()));
    }
    session.disconnect().await;
    Ok(())
}
