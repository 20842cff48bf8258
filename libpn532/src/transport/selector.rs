// libpn532/src/transport/selector.rs

use log::info;

use crate::transport::radio::{RadioBackend, RadioTransport};
use crate::transport::Transport;
use crate::ConnectError;

/// Picks the transport for a session, once, from what the host offers:
/// a user-granted serial port wins, then a platform radio backend.
#[derive(Default)]
pub struct TransportSelector {
    #[cfg(feature = "serial")]
    serial: Option<crate::transport::SerialConfig>,
    radio: Option<Box<dyn RadioBackend>>,
}

impl TransportSelector {
    /// Selector with no candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try a serial reader first.
    #[cfg(feature = "serial")]
    pub fn with_serial(mut self, config: crate::transport::SerialConfig) -> Self {
        self.serial = Some(config);
        self
    }

    /// Fall back to `backend` when no serial reader answers.
    pub fn with_radio(mut self, backend: Box<dyn RadioBackend>) -> Self {
        self.radio = Some(backend);
        self
    }

    /// True when at least one transport is configured.
    pub fn has_candidate(&self) -> bool {
        #[cfg(feature = "serial")]
        if self.serial.is_some() {
            return true;
        }
        self.radio.is_some()
    }

    /// Consume the configured candidates and build the chosen transport.
    pub fn select(&mut self) -> Result<Box<dyn Transport>, ConnectError> {
        #[cfg(feature = "serial")]
        if let Some(cfg) = self.serial.take() {
            info!("using serial transport on {}", cfg.port);
            self.radio = None;
            return Ok(Box::new(crate::transport::SerialTransport::new(cfg)));
        }

        if let Some(backend) = self.radio.take() {
            info!("using radio transport");
            return Ok(Box::new(RadioTransport::new(backend)));
        }

        Err(ConnectError::NoTransport)
    }
}
