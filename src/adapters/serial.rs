// ============================================================================
// Serial Transport
// UART link to the FPGA via the serialport crate
// ============================================================================

use crate::domain::SerialConfig;
use crate::interfaces::{Transport, TransportError, TransportResult};
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::io::{Read, Write};

/// 8N1 serial port. The device is released when the value is dropped.
pub struct SerialTransport {
    name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Open `config.port` at `config.baud_rate`
    pub fn open(config: &SerialConfig) -> TransportResult<Self> {
        config.validate().map_err(|reason| TransportError::Open {
            port: config.port.clone(),
            reason,
        })?;

        let port = serialport::new(config.port.as_str(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(config.timeout)
            .open()
            .map_err(|e| TransportError::Open {
                port: config.port.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Opened {} at {} baud", config.port, config.baud_rate);

        Ok(Self {
            name: format!("{} at {} baud", config.port, config.baud_rate),
            port: Some(port),
        })
    }

    fn port(&mut self) -> TransportResult<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(TransportError::Closed)
    }
}

impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_all(&mut self, bytes: &[u8]) -> TransportResult<()> {
        let port = self.port()?;
        port.write_all(bytes)?;
        port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> TransportResult<usize> {
        let waiting = self.port()?.bytes_to_read().map_err(std::io::Error::from)?;
        Ok(waiting as usize)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> TransportResult<()> {
        self.port()?.read_exact(buf)?;
        Ok(())
    }

    fn close(&mut self) -> TransportResult<()> {
        if let Some(mut port) = self.port.take() {
            port.flush()?;
        }
        Ok(())
    }
}
