#[path = "../common/mod.rs"]
mod common;

use libpn532::protocol::codec::encode_request;
use libpn532::protocol::{Command, CommandBuilder};
use libpn532::CommandError;

#[test]
fn get_card_id_frame() {
    let frame = CommandBuilder::get_card_id().unwrap();
    assert_eq!(hex::encode(frame.to_bytes()), "0000ff04fcd44a0100e1");
}

#[test]
fn read_block_carries_index() {
    let frame = CommandBuilder::read_block(0x81).unwrap();
    assert_eq!(frame.payload(), &[0x40, 0x01, 0x30, 0x81]);
}

#[test]
fn write_block_frame() {
    let frame = CommandBuilder::write_block(5, &[0xde, 0xad, 0xbe, 0xef]).unwrap();
    assert_eq!(frame.payload(), &[0x40, 0x01, 0xa2, 0x05, 0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn write_block_size_is_checked() {
    for len in [0usize, 3, 5, 16] {
        assert_eq!(
            CommandBuilder::write_block(5, &vec![0u8; len]),
            Err(CommandError::InvalidBlockSize {
                expected: 4,
                actual: len
            })
        );
    }
}

#[test]
fn wake_request_starts_with_lead_in() {
    let bytes = encode_request(&Command::WakeUp).unwrap();
    assert_eq!(bytes.len(), 16 + 11);
    assert_eq!(&bytes[..2], &[0x55, 0x55]);
    assert!(bytes[2..16].iter().all(|&b| b == 0));
    assert_eq!(hex::encode(&bytes[16..]), "0000ff05fbd41401140102");
}

#[test]
fn firmware_request() {
    let bytes = encode_request(&Command::GetFirmwareVersion).unwrap();
    assert_eq!(hex::encode(bytes), "0000ff02fed4022a");
}
