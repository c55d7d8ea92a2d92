// ============================================================================
// Transport Interface
// Byte-oriented, half-duplex link to the FPGA
// ============================================================================

use crate::protocol::{parse_inbound_frame, InboundFrame, INBOUND_FRAME_LEN};
use std::fmt;

/// Errors raised by a transport
#[derive(Debug)]
pub enum TransportError {
    /// Device could not be opened
    Open { port: String, reason: String },

    /// Read or write failed on an open device
    Io(std::io::Error),

    /// Operation attempted after `close`
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Open { port, reason } => {
                write!(f, "failed to open {}: {}", port, reason)
            },
            TransportError::Io(e) => write!(f, "transport I/O error: {}", e),
            TransportError::Closed => write!(f, "transport is closed"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        TransportError::Io(e)
    }
}

/// Result type alias for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Serial-style channel to the decision engine.
///
/// Implementations: `SerialTransport` (UART), in-memory fakes in tests.
pub trait Transport: Send {
    /// Device name for logging
    fn name(&self) -> &str;

    /// Blocking write of the whole buffer
    fn write_all(&mut self, bytes: &[u8]) -> TransportResult<()>;

    /// Number of received bytes waiting to be read (non-blocking)
    fn bytes_available(&mut self) -> TransportResult<usize>;

    /// Blocking read filling the whole buffer
    fn read_exact(&mut self, buf: &mut [u8]) -> TransportResult<()>;

    /// Flush and release the device
    fn close(&mut self) -> TransportResult<()> {
        Ok(())
    }

    /// Read one decision frame if a complete frame is already buffered.
    ///
    /// Never blocks waiting for a partial frame: with fewer than
    /// `INBOUND_FRAME_LEN` bytes available this returns `Ok(None)` and leaves
    /// the buffered bytes in place.
    fn poll_frame(&mut self) -> TransportResult<Option<InboundFrame>> {
        if self.bytes_available()? < INBOUND_FRAME_LEN {
            return Ok(None);
        }

        let mut buf = [0u8; INBOUND_FRAME_LEN];
        self.read_exact(&mut buf)?;
        Ok(parse_inbound_frame(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Action;
    use std::collections::VecDeque;

    struct Loopback {
        rx: VecDeque<u8>,
    }

    impl Transport for Loopback {
        fn name(&self) -> &str {
            "loopback"
        }

        fn write_all(&mut self, _bytes: &[u8]) -> TransportResult<()> {
            Ok(())
        }

        fn bytes_available(&mut self) -> TransportResult<usize> {
            Ok(self.rx.len())
        }

        fn read_exact(&mut self, buf: &mut [u8]) -> TransportResult<()> {
            for slot in buf.iter_mut() {
                *slot = self
                    .rx
                    .pop_front()
                    .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::UnexpectedEof))?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_poll_frame_waits_for_full_frame() {
        let mut link = Loopback {
            rx: VecDeque::from(vec![0x01, 0xC8]),
        };

        assert!(link.poll_frame().unwrap().is_none());
        // Partial bytes stay buffered
        assert_eq!(link.bytes_available().unwrap(), 2);

        link.rx.push_back(0x00);
        let frame = link.poll_frame().unwrap().unwrap();
        assert_eq!(frame.into_parts(), (Action::Buy, 2.0));
        assert_eq!(link.bytes_available().unwrap(), 0);
    }

    #[test]
    fn test_poll_frame_reads_one_frame_at_a_time() {
        let mut link = Loopback {
            rx: VecDeque::from(vec![0x01, 0xC8, 0x00, 0x02, 0x90, 0x01]),
        };

        assert_eq!(link.poll_frame().unwrap().unwrap().action, Action::Buy);
        assert_eq!(link.poll_frame().unwrap().unwrap().action, Action::Sell);
        assert!(link.poll_frame().unwrap().is_none());
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Open {
            port: "/dev/ttyUSB0".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to open /dev/ttyUSB0: No such file or directory"
        );
        assert_eq!(TransportError::Closed.to_string(), "transport is closed");
    }
}
