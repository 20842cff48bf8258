#[path = "../common/mod.rs"]
mod common;

use libpn532::test_support::SimulatedRadio;
use libpn532::transport::TransportSelector;
use libpn532::{ConnectError, TransportKind};

#[test]
fn empty_selector_has_no_transport() {
    let mut selector = TransportSelector::new();
    assert!(!selector.has_candidate());
    assert!(matches!(selector.select(), Err(ConnectError::NoTransport)));
}

#[test]
fn radio_is_chosen_once() {
    let mut selector = TransportSelector::new().with_radio(Box::new(SimulatedRadio::new()));
    assert!(selector.has_candidate());
    assert_eq!(selector.select().unwrap().kind(), TransportKind::Radio);
    assert!(matches!(selector.select(), Err(ConnectError::NoTransport)));
}

#[cfg(feature = "serial")]
#[test]
fn serial_wins_over_radio() {
    use libpn532::transport::SerialConfig;

    let mut selector = TransportSelector::new()
        .with_radio(Box::new(SimulatedRadio::new()))
        .with_serial(SerialConfig::new("/dev/ttyUSB0"));
    assert_eq!(selector.select().unwrap().kind(), TransportKind::Serial);
}
