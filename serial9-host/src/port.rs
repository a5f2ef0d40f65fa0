//! USB serial port discovery and opening

use std::time::Duration;

use serialport::{SerialPort, SerialPortType};

use crate::client::Serial9;
use crate::config::{HostConfig, BRIDGE_USB_PID, BRIDGE_USB_VID};
use crate::error::HostError;

/// Line rate for the USB CDC port; the device ignores it
const USB_LINE_RATE: u32 = 115_200;

/// Find the first USB port that looks like a bridge
pub fn find_port() -> Result<String, HostError> {
    let mut ports = serialport::available_ports()?;
    ports.sort_by(|a, b| a.port_name.cmp(&b.port_name));

    for port in ports {
        if let SerialPortType::UsbPort(usb) = &port.port_type {
            if usb.vid == BRIDGE_USB_VID && usb.pid == BRIDGE_USB_PID {
                log::info!("found serial9 bridge at {}", port.port_name);
                return Ok(port.port_name);
            }
        }
    }

    Err(HostError::NoDevice)
}

/// Open the bridge described by `config` and select its bus baud rate
pub fn open(config: &HostConfig) -> Result<Serial9<Box<dyn SerialPort>>, HostError> {
    let path = match &config.port {
        Some(path) => path.clone(),
        None => find_port()?,
    };

    let port = serialport::new(&path, USB_LINE_RATE)
        .timeout(Duration::from_millis(config.timeout_ms))
        .open()?;
    log::info!("opened {}", path);

    let mut client = Serial9::new(port);
    client.set_baud(config.baud)?;
    Ok(client)
}
