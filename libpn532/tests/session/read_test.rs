#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use common::helpers::*;
use libpn532::{ConnectionState, Error, FrameError, TransportError};

#[tokio::test]
async fn dump_stops_at_sentinel_and_pads() {
    let (session, mock) = connected_session(quick_config()).await;
    queue_reads(&mock, pages_with_sentinel_on_page_6());
    // would be page 7; must never be requested
    queue_reads(&mock, vec![read_frame(&plain_page(7))]);

    let buf = session.read_all_pages().await.unwrap();
    assert!(buf.is_terminated());
    assert_eq!(buf.page_count(), 3);
    assert_eq!(buf.len(), 16);
    assert_eq!(buf.padding(), 4);
    assert_eq!(
        hex::encode(buf.to_bytes()),
        "0405102005061020616263fe00000000"
    );
    assert_eq!(mock.pending_responses(), 1);
    assert_eq!(session.state(), ConnectionState::Ready);

    // READ requests went out for pages 4, 5, 6
    let sent = mock.sent();
    let reads: Vec<u8> = sent[2..].iter().map(|f| f[f.len() - 2]).collect();
    assert_eq!(reads, vec![4, 5, 6]);
}

#[tokio::test]
async fn ceiling_without_sentinel_is_not_an_error() {
    let config = quick_config().with_first_page(4).with_page_ceiling(6);
    let (session, mock) = connected_session(config).await;
    queue_reads(&mock, vec![read_frame(&plain_page(4)), read_frame(&plain_page(5))]);

    let buf = session.read_all_pages().await.unwrap();
    assert!(!buf.is_terminated());
    assert_eq!(buf.len(), 8);
    assert_eq!(buf.padding(), 0);
    assert_eq!(session.last_pages(), Some(buf));
}

#[tokio::test]
async fn timeout_mid_dump_keeps_pages() {
    let (session, mock) = connected_session(quick_config()).await;
    queue_reads(&mock, vec![read_frame(&plain_page(4)), read_frame(&plain_page(5))]);

    let err = session.read_all_pages().await.unwrap_err();
    assert!(err.is_timeout());
    match err {
        Error::PartialRead { pages, source } => {
            assert_eq!(pages.page_count(), 2);
            assert_eq!(pages.len(), 8);
            assert!(!pages.is_terminated());
            assert!(matches!(*source, Error::Transport(TransportError::Timeout)));
        }
        other => panic!("expected partial read, got {other:?}"),
    }
    assert_eq!(session.state(), ConnectionState::Ready);
    assert_eq!(session.last_pages(), None);
}

#[tokio::test]
async fn corrupt_page_frame() {
    let (session, mock) = connected_session(quick_config()).await;
    let mut bad = read_frame(&plain_page(5));
    let last = bad.len() - 1;
    bad[last] ^= 0xff;
    queue_reads(&mock, vec![read_frame(&plain_page(4)), bad]);

    match session.read_all_pages().await {
        Err(Error::PartialRead { pages, source }) => {
            assert_eq!(pages.page_count(), 1);
            assert!(matches!(
                *source,
                Error::Frame(FrameError::ChecksumMismatch { .. })
            ));
        }
        other => panic!("expected partial read, got {other:?}"),
    }
    assert_eq!(session.state(), ConnectionState::Ready);
}

#[tokio::test]
async fn lost_port_disconnects() {
    let (session, mock) = connected_session(quick_config()).await;
    mock.set_send_failures(1);

    match session.read_all_pages().await {
        Err(err @ Error::PartialRead { .. }) => {
            assert!(err.is_fatal());
            if let Error::PartialRead { pages, source } = err {
                assert!(pages.is_empty());
                assert!(matches!(*source, Error::Transport(TransportError::Io(_))));
            }
        }
        other => panic!("expected partial read, got {other:?}"),
    }
    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert!(!mock.is_connected());
}

#[tokio::test]
async fn late_answer_is_not_taken_for_the_retry() {
    let (session, mock) = connected_session(quick_config()).await;
    queue_reads(&mock, vec![read_frame(&plain_page(4)), read_frame(&plain_page(5))]);
    // page 6 is acknowledged but its answer comes too late
    mock.push_response(ack_and(Vec::new()));

    let err = session.read_all_pages().await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(session.state(), ConnectionState::Ready);

    mock.push_response(read_frame(&[0x66; 4]));
    queue_reads(
        &mock,
        vec![
            read_frame(&[0x44; 4]),
            read_frame(&[0x55; 4]),
            read_frame(&[0xfe, 0, 0, 0]),
        ],
    );

    let buf = session.read_all_pages().await.unwrap();
    assert_eq!(buf.pages()[0], vec![0x44; 4]);
    assert_eq!(buf.pages()[1], vec![0x55; 4]);
    assert_eq!(hex::encode(buf.to_bytes()), "4444444455555555fe00000000000000");
    assert_eq!(mock.pending_responses(), 0);
}

#[tokio::test]
async fn input_is_cleared_before_every_request() {
    let (session, mock) = connected_session(quick_config()).await;
    queue_reads(&mock, pages_with_sentinel_on_page_6());
    let before = mock.input_clear_count();

    session.read_all_pages().await.unwrap();
    assert_eq!(mock.input_clear_count() - before, 3);
}
