// libpn532/src/session/builder.rs

use crate::session::config::SessionConfig;
use crate::session::handle::CardSession;
use crate::transport::{RadioBackend, Transport, TransportSelector};

/// Helper to construct a `CardSession` with optional configuration.
#[derive(Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    radio: Option<Box<dyn RadioBackend>>,
    transport: Option<Box<dyn Transport>>,
}

impl SessionBuilder {
    /// Builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Serial port the user granted access to. Takes precedence over radio.
    pub fn with_serial_port(mut self, port: impl Into<String>) -> Self {
        self.config.serial_port = Some(port.into());
        self
    }

    /// Platform radio backend used when no serial port is configured.
    pub fn with_radio(mut self, backend: Box<dyn RadioBackend>) -> Self {
        self.radio = Some(backend);
        self
    }

    /// Provide an already-created transport (e.g. `MockTransport`); skips
    /// transport selection entirely.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Finish the session. It starts `Disconnected`.
    pub fn build(self) -> CardSession {
        #[allow(unused_mut)]
        let mut selector = TransportSelector::new();
        #[cfg(feature = "serial")]
        if let Some(port) = &self.config.serial_port {
            selector = selector.with_serial(
                crate::transport::SerialConfig::new(port.clone())
                    .with_baud_rate(self.config.baud_rate),
            );
        }
        if let Some(radio) = self.radio {
            selector = selector.with_radio(radio);
        }
        CardSession::from_parts(self.config, selector, self.transport)
    }
}
