#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use libpn532::protocol::codec::decode_response_frame;
use libpn532::protocol::{Command, Frame, Response};
use libpn532::{CardType, Error, ResponseError};

#[test]
fn identify_ntag_and_classic() {
    let uid = sample_uid();
    let resp = decode_response_frame(
        &Command::GetCardId,
        &identify_frame(&uid, NTAG_ATQA, NTAG_SAK),
    )
    .unwrap();
    let id = resp.into_card_id().unwrap().unwrap();
    assert_eq!(id.uid().as_bytes(), &uid[..]);
    assert_eq!(id.atqa().as_u16(), 0x0044);
    assert_eq!(id.inferred_type(), CardType::Ntag215);
    assert_eq!(
        id.to_string(),
        "NTAG215 uid=04a23b125c6d80 atqa=0044 sak=00"
    );

    let resp = decode_response_frame(
        &Command::GetCardId,
        &identify_frame(&[0xde, 0xad, 0xbe, 0xef], CLASSIC_ATQA, CLASSIC_SAK),
    )
    .unwrap();
    let id = resp.into_card_id().unwrap().unwrap();
    assert_eq!(id.inferred_type(), CardType::MifareClassic1K);
    assert_eq!(id.uid().len(), 4);
}

#[test]
fn unknown_card_family() {
    let resp = decode_response_frame(
        &Command::GetCardId,
        &identify_frame(&[1, 2, 3, 4], [0x03, 0x44], 0x20),
    )
    .unwrap();
    assert_eq!(
        resp.into_card_id().unwrap().unwrap().inferred_type(),
        CardType::Unknown
    );
}

#[test]
fn no_target_is_none() {
    let resp = decode_response_frame(&Command::GetCardId, &no_card_frame()).unwrap();
    assert_eq!(resp, Response::CardId(None));
}

#[test]
fn read_answer_carries_sixteen_bytes() {
    let cmd = Command::ReadBlock { block_index: 4 };
    let data = decode_response_frame(&cmd, &read_frame(&[0xaa, 0xbb]))
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(data.len(), 16);
    assert_eq!(&data[..2], &[0xaa, 0xbb]);
}

#[test]
fn reader_status_surfaces() {
    let cmd = Command::ReadBlock { block_index: 4 };
    match decode_response_frame(&cmd, &status_frame(0x14)) {
        Err(Error::Response(ResponseError::ReaderStatus(0x14))) => {}
        other => panic!("expected reader status, got {other:?}"),
    }
}

#[test]
fn error_frame_is_reader_status() {
    let frame = Frame::new(0x7f, vec![0x81]).unwrap();
    assert_eq!(
        Response::decode(&Command::GetCardId, &frame),
        Err(ResponseError::ReaderStatus(0x81))
    );
}

#[test]
fn answer_to_another_command_is_rejected() {
    match decode_response_frame(&Command::GetCardId, &wake_frame()) {
        Err(Error::Response(ResponseError::UnexpectedResponse {
            expected: 0x4b,
            actual: 0x15,
        })) => {}
        other => panic!("expected unexpected response, got {other:?}"),
    }
}

#[test]
fn host_frame_is_not_an_answer() {
    let frame = Frame::new(0xd4, vec![0x15]).unwrap();
    assert!(matches!(
        Response::decode(&Command::WakeUp, &frame),
        Err(ResponseError::UnexpectedResponse { expected: 0xd5, .. })
    ));
}

#[test]
fn write_acknowledgement() {
    let cmd = Command::WriteBlock {
        block_index: 5,
        data: vec![1, 2, 3, 4],
    };
    assert_eq!(
        decode_response_frame(&cmd, &write_ok_frame()).unwrap(),
        Response::Written
    );
}

#[test]
fn firmware_answer() {
    let fw = decode_response_frame(&Command::GetFirmwareVersion, &firmware_frame())
        .unwrap()
        .into_firmware()
        .unwrap();
    assert_eq!((fw.ic, fw.version, fw.revision), (0x32, 1, 6));
}
