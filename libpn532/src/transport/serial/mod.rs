// libpn532/src/transport/serial/mod.rs

//! PN532 over a UART/USB-serial bridge (HSU mode).

mod ports;

pub use ports::{available_ports, PortInfo};

use std::io::{ErrorKind, Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use serialport::SerialPort;

use crate::constants::DEFAULT_BAUD_RATE;
use crate::transport::traits::Transport;
use crate::types::TransportKind;
use crate::utils::Hex;
use crate::TransportError;

const READ_CHUNK: usize = 64;

/// Port settings. The line is always 8N1 without flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0`.
    pub port: String,
    /// Line speed.
    pub baud_rate: u32,
}

impl SerialConfig {
    /// Port at the default baud rate.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }

    /// Override the line speed.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

type SharedPort = Arc<Mutex<Box<dyn SerialPort>>>;

/// Serial transport backed by the `serialport` crate. Blocking port I/O
/// runs on tokio's blocking pool.
pub struct SerialTransport {
    config: SerialConfig,
    port: Option<SharedPort>,
}

impl SerialTransport {
    /// Unopened transport; `connect` opens the port.
    pub fn new(config: SerialConfig) -> Self {
        Self { config, port: None }
    }

    /// Port settings.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    fn port(&self) -> Result<SharedPort, TransportError> {
        self.port.clone().ok_or(TransportError::NotConnected)
    }
}

async fn blocking<T, F>(f: F) -> Result<T, TransportError>
where
    F: FnOnce() -> Result<T, TransportError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TransportError::Unavailable(format!("serial worker failed: {e}")))?
}

fn lock(port: &SharedPort) -> Result<std::sync::MutexGuard<'_, Box<dyn SerialPort>>, TransportError> {
    port.lock()
        .map_err(|_| TransportError::Unavailable("serial port lock poisoned".into()))
}

#[async_trait]
impl Transport for SerialTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Serial
    }

    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.port.is_some() {
            return Ok(());
        }

        let SerialConfig { port, baud_rate } = self.config.clone();
        debug!("opening serial port {} at {} baud", port, baud_rate);
        let opened = blocking(move || {
            let p = serialport::new(&port, baud_rate)
                .data_bits(serialport::DataBits::Eight)
                .parity(serialport::Parity::None)
                .stop_bits(serialport::StopBits::One)
                .flow_control(serialport::FlowControl::None)
                .timeout(Duration::from_millis(100))
                .open()?;
            p.clear(serialport::ClearBuffer::All)?;
            Ok(p)
        })
        .await?;

        self.port = Some(Arc::new(Mutex::new(opened)));
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let port = self.port()?;
        let bytes = data.to_vec();
        trace!("serial >> {}", Hex(&bytes));
        blocking(move || {
            let mut p = lock(&port)?;
            p.write_all(&bytes)?;
            p.flush()?;
            Ok(())
        })
        .await
    }

    async fn clear_input(&mut self) -> Result<(), TransportError> {
        let port = self.port()?;
        blocking(move || {
            lock(&port)?.clear(serialport::ClearBuffer::Input)?;
            Ok(())
        })
        .await
    }

    async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let port = self.port()?;
        let chunk = blocking(move || {
            let mut p = lock(&port)?;
            p.set_timeout(timeout)?;
            let mut buf = [0u8; READ_CHUNK];
            match p.read(&mut buf) {
                Ok(0) => Err(TransportError::Closed),
                Ok(n) => Ok(buf[..n].to_vec()),
                Err(e) if e.kind() == ErrorKind::TimedOut => Err(TransportError::Timeout),
                Err(e) => Err(e.into()),
            }
        })
        .await?;
        trace!("serial << {}", Hex(&chunk));
        Ok(chunk)
    }

    async fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.port.take().is_some() {
            debug!("closed serial port {}", self.config.port);
        }
        Ok(())
    }
}
