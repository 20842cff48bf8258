// Session and transport setup shared by integration tests

use std::time::Duration;

use libpn532::test_support::seed_connect;
use libpn532::transport::MockTransport;
use libpn532::{CardSession, SessionConfig};

use super::fixtures::ack_and;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Config with short timeouts and no inter-page delay.
pub fn quick_config() -> SessionConfig {
    SessionConfig::default()
        .with_inter_page_delay(Duration::ZERO)
        .with_read_timeout(Duration::from_millis(40))
        .with_scan_timeout(Duration::from_millis(40))
        .with_connect_timeout(Duration::from_millis(40))
}

/// A session connected over a fresh mock, plus the mock handle.
pub async fn connected_session(config: SessionConfig) -> (CardSession, MockTransport) {
    init_logger();
    let mock = MockTransport::new();
    seed_connect(&mock);
    let session = CardSession::new(config);
    session
        .connect_with(Box::new(mock.clone()))
        .await
        .expect("connect over mock");
    (session, mock)
}

/// Queue each READ answer preceded by the reader's ACK.
pub fn queue_reads(mock: &MockTransport, frames: Vec<Vec<u8>>) {
    for f in frames {
        mock.push_response(ack_and(f));
    }
}
