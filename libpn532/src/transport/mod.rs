// libpn532/src/transport/mod.rs

/// Scripted in-memory transport.
pub mod mock;
/// Native radio transport.
pub mod radio;
/// Choice between serial and radio.
pub mod selector;
#[cfg(feature = "serial")]
pub mod serial;
/// The `Transport` trait.
pub mod traits;

pub use mock::MockTransport;
pub use radio::{DiscoveredTag, RadioBackend, RadioTransport};
pub use selector::TransportSelector;
#[cfg(feature = "serial")]
pub use serial::{available_ports, PortInfo, SerialConfig, SerialTransport};
pub use traits::Transport;
