#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use common::helpers::*;
use libpn532::test_support::SimulatedRadio;
use libpn532::transport::DiscoveredTag;
use libpn532::{
    CardSession, CardType, ConnectionState, Error, EventLevel, ResponseError, TransportKind,
};

fn ntag() -> DiscoveredTag {
    DiscoveredTag {
        uid: sample_uid(),
        atqa: NTAG_ATQA,
        sak: NTAG_SAK,
    }
}

async fn radio_session(radio: &SimulatedRadio) -> CardSession {
    init_logger();
    let session = CardSession::builder()
        .with_config(quick_config())
        .with_radio(Box::new(radio.clone()))
        .build();
    session.connect().await.unwrap();
    session
}

#[tokio::test]
async fn radio_is_selected_without_serial_port() {
    let radio = SimulatedRadio::new();
    let session = radio_session(&radio).await;
    assert_eq!(session.state(), ConnectionState::Ready);
    assert_eq!(session.transport_kind().await, Some(TransportKind::Radio));
    assert!(radio.is_started());

    session.disconnect().await;
    assert!(!radio.is_started());
}

#[tokio::test]
async fn tag_event_satisfies_scan() {
    let radio = SimulatedRadio::new();
    let session = radio_session(&radio).await;

    assert_eq!(session.scan().await.unwrap(), None);

    assert!(radio.present(ntag()));
    let id = session.scan().await.unwrap().expect("tag");
    assert_eq!(id.uid().as_bytes(), &sample_uid()[..]);
    assert_eq!(id.inferred_type(), CardType::Ntag215);
}

#[tokio::test]
async fn full_dump_over_radio() {
    let radio = SimulatedRadio::with_memory(card_image());
    let session = radio_session(&radio).await;
    radio.present(ntag());
    session.scan().await.unwrap().expect("tag");

    let buf = session.read_all_pages().await.unwrap();
    assert!(buf.is_terminated());
    assert_eq!(buf.to_bytes(), vec![0x03, 0x0a, 0xd1, 0x01, 0x06, 0xfe, 0x00, 0x00]);
    assert_eq!(radio.read_count(), 2);
}

#[tokio::test]
async fn write_over_radio() {
    let radio = SimulatedRadio::with_memory(card_image());
    let session = radio_session(&radio).await;
    radio.present(ntag());
    session.scan().await.unwrap().expect("tag");

    session.write_page(6, &[9, 8, 7, 6]).await.unwrap();
    assert_eq!(&radio.memory()[24..28], &[9, 8, 7, 6]);
}

#[tokio::test]
async fn events_follow_scan() {
    let radio = SimulatedRadio::new();
    let session = CardSession::builder()
        .with_config(quick_config())
        .with_radio(Box::new(radio.clone()))
        .build();
    let mut rx = session.subscribe();
    session.connect().await.unwrap();

    let ready = rx.recv().await.unwrap();
    assert_eq!(ready.message, "reader ready over radio (PN532 v1.6)");

    radio.present(ntag());
    session.scan().await.unwrap();
    let found = rx.recv().await.unwrap();
    assert_eq!(found.level, EventLevel::Info);
    assert!(found.message.starts_with("card detected: NTAG215"), "{found}");
}

#[tokio::test]
async fn same_tag_scanned_twice() {
    let radio = SimulatedRadio::with_memory(card_image());
    let session = radio_session(&radio).await;
    radio.present(ntag());

    let first = session.scan().await.unwrap().expect("tag");
    session.read_all_pages().await.unwrap();
    let second = session.scan().await.unwrap().expect("tag still in field");
    assert_eq!(first, second);

    radio.remove();
    assert_eq!(session.scan().await.unwrap(), None);
}

#[tokio::test]
async fn tag_leaving_mid_read_keeps_session_ready() {
    let radio = SimulatedRadio::with_memory(card_image());
    let session = radio_session(&radio).await;
    radio.present(ntag());
    session.scan().await.unwrap().expect("tag");

    radio.fail_card_ops(1);
    match session.read_all_pages().await {
        Err(Error::PartialRead { pages, source }) => {
            assert!(pages.is_empty());
            assert!(matches!(
                *source,
                Error::Response(ResponseError::ReaderStatus(0x01))
            ));
        }
        other => panic!("expected partial read, got {other:?}"),
    }
    assert_eq!(session.state(), ConnectionState::Ready);

    // a fresh scan selects the tag again
    session.scan().await.unwrap().expect("tag");
    assert!(session.read_all_pages().await.unwrap().is_terminated());
}

#[tokio::test]
async fn removed_tag_reports_status_not_disconnect() {
    let radio = SimulatedRadio::with_memory(card_image());
    let session = radio_session(&radio).await;
    radio.present(ntag());
    session.scan().await.unwrap().expect("tag");

    radio.remove();
    assert!(matches!(
        session.write_page(6, &[1, 2, 3, 4]).await,
        Err(Error::Response(ResponseError::ReaderStatus(0x01)))
    ));
    assert_eq!(session.state(), ConnectionState::Ready);
}
