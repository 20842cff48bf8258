#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use libpn532::protocol::codec::{ack_bytes, nack_bytes};
use libpn532::protocol::{FrameReader, Message};
use libpn532::FrameError;

fn data_code(msg: Option<Message>) -> Option<u8> {
    match msg {
        Some(Message::Data(frame)) => frame.code(),
        _ => None,
    }
}

#[test]
fn ack_then_frame_byte_by_byte() {
    let bytes = ack_and(firmware_frame());
    let mut reader = FrameReader::new();
    let mut seen = Vec::new();
    for b in bytes {
        reader.push(&[b]);
        while let Some(msg) = reader.next_message().unwrap() {
            seen.push(msg);
        }
    }
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], Message::Ack);
    assert_eq!(data_code(seen.pop()), Some(0x03));
    assert_eq!(reader.buffered(), 0);
}

#[test]
fn noise_before_start_code_is_skipped() {
    let mut reader = FrameReader::new();
    reader.push(&[0x55, 0x13, 0x37]);
    reader.push(&wake_frame());
    assert_eq!(data_code(reader.next_message().unwrap()), Some(0x15));
}

#[test]
fn two_frames_in_one_chunk() {
    let mut chunk = wake_frame();
    chunk.extend(no_card_frame());
    let mut reader = FrameReader::new();
    reader.push(&chunk);
    assert_eq!(data_code(reader.next_message().unwrap()), Some(0x15));
    assert_eq!(data_code(reader.next_message().unwrap()), Some(0x4b));
    assert_eq!(reader.next_message().unwrap(), None);
}

#[test]
fn nack_is_recognised() {
    let mut reader = FrameReader::new();
    reader.push(nack_bytes());
    assert_eq!(reader.next_message().unwrap(), Some(Message::Nack));
}

#[test]
fn ack_bytes_are_the_ack_frame() {
    assert_eq!(hex::encode(ack_bytes()), "0000ff00ff00");
}

#[test]
fn corrupt_frame_clears_buffer() {
    let mut bytes = read_frame(&[1, 2, 3, 4]);
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    let mut reader = FrameReader::new();
    reader.push(&bytes);
    assert!(matches!(
        reader.next_message(),
        Err(FrameError::ChecksumMismatch { .. })
    ));
    assert_eq!(reader.buffered(), 0);

    reader.push(&wake_frame());
    assert_eq!(data_code(reader.next_message().unwrap()), Some(0x15));
}
