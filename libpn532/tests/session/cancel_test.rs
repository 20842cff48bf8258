#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::helpers::*;
use libpn532::{ConnectionState, Error, TransportError};

async fn wait_for_state(session: &libpn532::CardSession, state: ConnectionState) {
    for _ in 0..100 {
        if session.state() == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("session never reached {state}");
}

#[tokio::test]
async fn disconnect_cancels_in_flight_read() {
    // the reader never answers, only a cancel can end the read early
    let config = quick_config().with_read_timeout(Duration::from_secs(30));
    let (session, mock) = connected_session(config).await;
    let session = Arc::new(session);

    let reader = {
        let session = session.clone();
        tokio::spawn(async move { session.read_all_pages().await })
    };
    wait_for_state(&session, ConnectionState::Reading).await;

    session.disconnect().await;
    let res = tokio::time::timeout(Duration::from_secs(1), reader)
        .await
        .expect("read should end promptly")
        .unwrap();

    match res {
        Err(Error::PartialRead { pages, source }) => {
            assert!(pages.is_empty());
            assert!(matches!(*source, Error::Transport(TransportError::Cancelled)));
        }
        other => panic!("expected cancelled read, got {other:?}"),
    }
    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert!(!mock.is_connected());
}

#[tokio::test]
async fn concurrent_operation_is_busy() {
    let config = quick_config().with_read_timeout(Duration::from_secs(30));
    let (session, _mock) = connected_session(config).await;
    let session = Arc::new(session);

    let reader = {
        let session = session.clone();
        tokio::spawn(async move { session.read_all_pages().await })
    };
    wait_for_state(&session, ConnectionState::Reading).await;

    assert!(matches!(
        session.scan().await,
        Err(Error::Busy {
            state: ConnectionState::Reading
        })
    ));
    assert!(matches!(
        session.write_page(4, &[0; 4]).await,
        Err(Error::Busy { .. })
    ));
    assert_eq!(session.state(), ConnectionState::Reading);

    session.disconnect().await;
    let _ = reader.await;
}

#[tokio::test]
async fn disconnect_during_inter_page_delay() {
    let config = quick_config().with_inter_page_delay(Duration::from_secs(30));
    let (session, mock) = connected_session(config).await;
    common::helpers::queue_reads(
        &mock,
        vec![common::fixtures::read_frame(&common::fixtures::plain_page(4))],
    );
    let session = Arc::new(session);

    let reader = {
        let session = session.clone();
        tokio::spawn(async move { session.read_all_pages().await })
    };
    // first page read, now sleeping before page 5
    for _ in 0..100 {
        if mock.pending_responses() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
    session.disconnect().await;

    let res = tokio::time::timeout(Duration::from_secs(1), reader)
        .await
        .expect("read should end promptly")
        .unwrap();
    match res {
        Err(Error::PartialRead { pages, source }) => {
            assert_eq!(pages.page_count(), 1);
            assert!(matches!(*source, Error::Transport(TransportError::Cancelled)));
        }
        other => panic!("expected cancelled read, got {other:?}"),
    }
}
