#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use common::helpers::*;
use libpn532::{CommandError, ConnectionState, Error, ResponseError};

#[tokio::test]
async fn wrong_block_size_sends_nothing() {
    let (session, mock) = connected_session(quick_config()).await;
    let before = mock.sent().len();

    for data in [&[1u8, 2, 3][..], &[1, 2, 3, 4, 5][..], &[][..]] {
        match session.write_page(5, data).await {
            Err(Error::Command(CommandError::InvalidBlockSize { expected: 4, actual })) => {
                assert_eq!(actual, data.len());
            }
            other => panic!("expected invalid block size, got {other:?}"),
        }
    }
    assert_eq!(mock.sent().len(), before);
    assert_eq!(session.state(), ConnectionState::Ready);
}

#[tokio::test]
async fn write_page_sends_write_command() {
    let (session, mock) = connected_session(quick_config()).await;
    mock.push_response(ack_and(write_ok_frame()));

    session.write_page(5, &[0xde, 0xad, 0xbe, 0xef]).await.unwrap();
    let frame = mock.sent().pop().unwrap();
    assert!(hex::encode(&frame).starts_with("0000ff09f7d44001a205deadbeef"));
    assert_eq!(
        libpn532::Frame::decode(&frame).unwrap().payload(),
        &[0x40, 0x01, 0xa2, 0x05, 0xde, 0xad, 0xbe, 0xef]
    );
    assert_eq!(session.state(), ConnectionState::Ready);
}

#[tokio::test]
async fn card_refuses_write() {
    let (session, mock) = connected_session(quick_config()).await;
    mock.push_response(ack_and(status_frame(0x01)));

    assert!(matches!(
        session.write_page(5, &[1, 2, 3, 4]).await,
        Err(Error::Response(ResponseError::ReaderStatus(0x01)))
    ));
    assert_eq!(session.state(), ConnectionState::Ready);
}

#[tokio::test]
async fn nack_is_reported() {
    let (session, mock) = connected_session(quick_config()).await;
    mock.push_response(ack_and(libpn532::protocol::codec::nack_bytes().to_vec()));

    assert!(matches!(
        session.write_page(5, &[1, 2, 3, 4]).await,
        Err(Error::Response(ResponseError::Nack))
    ));
}

#[tokio::test]
async fn nack_before_ack_belongs_to_an_earlier_command() {
    let (session, mock) = connected_session(quick_config()).await;
    mock.push_response(libpn532::protocol::codec::nack_bytes().to_vec());
    mock.push_response(ack_and(write_ok_frame()));

    session.write_page(5, &[1, 2, 3, 4]).await.unwrap();
    assert_eq!(mock.pending_responses(), 0);
}
