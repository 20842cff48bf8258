// libpn532/src/transport/serial/ports.rs

use serialport::SerialPortType;

use crate::TransportError;

/// A serial port the host exposes, as shown to the user when granting
/// access to a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// OS name of the port.
    pub name: String,
    /// USB vendor and product ids for USB-serial bridges.
    pub usb_id: Option<(u16, u16)>,
    /// USB product string, when known.
    pub product: Option<String>,
}

impl PortInfo {
    /// True for USB serial adapters.
    pub fn is_usb(&self) -> bool {
        self.usb_id.is_some()
    }
}

impl From<serialport::SerialPortInfo> for PortInfo {
    fn from(info: serialport::SerialPortInfo) -> Self {
        let (usb_id, product) = match info.port_type {
            SerialPortType::UsbPort(usb) => (Some((usb.vid, usb.pid)), usb.product),
            _ => (None, None),
        };
        Self {
            name: info.port_name,
            usb_id,
            product,
        }
    }
}

/// Enumerate serial ports, USB bridges first.
pub fn available_ports() -> Result<Vec<PortInfo>, TransportError> {
    let mut ports: Vec<PortInfo> = serialport::available_ports()?
        .into_iter()
        .map(PortInfo::from)
        .collect();
    ports.sort_by_key(|p| !p.is_usb());
    Ok(ports)
}
