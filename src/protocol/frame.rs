// ============================================================================
// UART Frames
// Fixed-length, delimiter-free frames exchanged with the FPGA
// ============================================================================
//
// Outbound (host -> FPGA), 4 bytes:
//     [0..4]  Q16.16 price, big-endian u32
//
// Inbound (FPGA -> host), 3 bytes:
//     [0]     bits [1:0] action code (0=HOLD, 1=BUY, 2=SELL, 3=UNKNOWN)
//     [1]     metric low byte
//     [2]     metric high byte
//
// NOTE: the inbound metric is little-endian while the outbound price is
// big-endian. The FPGA bitstream expects exactly this layout; keep both
// orders as they are unless the hardware changes.
// ============================================================================

use crate::domain::Action;
use crate::numeric::{decode_metric, NumericResult, Q16};

/// Length of the outbound price frame.
pub const OUTBOUND_FRAME_LEN: usize = 4;

/// Length of the inbound decision frame.
pub const INBOUND_FRAME_LEN: usize = 3;

/// Mask selecting the action code bits of byte 0.
pub const ACTION_MASK: u8 = 0x03;

// ============================================================================
// Outbound
// ============================================================================

/// Encode a price into the 4-byte outbound frame (MSB first).
///
/// # Errors
/// Propagates the codec's rejection of prices outside `[0, 65536)`.
///
/// # Example
/// ```
/// use price_bridge::protocol::build_outbound_frame;
///
/// assert_eq!(build_outbound_frame(1.0).unwrap(), [0x00, 0x01, 0x00, 0x00]);
/// ```
#[inline]
pub fn build_outbound_frame(price: f64) -> NumericResult<[u8; OUTBOUND_FRAME_LEN]> {
    Q16::from_price(price).map(encode_q16)
}

/// Serialize an already-encoded Q16.16 value (MSB first).
#[inline]
pub const fn encode_q16(value: Q16) -> [u8; OUTBOUND_FRAME_LEN] {
    value.raw_value().to_be_bytes()
}

/// Read back an outbound frame, as the FPGA does on its side of the link.
#[inline]
pub const fn decode_outbound_frame(frame: [u8; OUTBOUND_FRAME_LEN]) -> Q16 {
    Q16::from_raw(u32::from_be_bytes(frame))
}

// ============================================================================
// Inbound
// ============================================================================

/// Decoded 3-byte decision frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InboundFrame {
    /// Decision from bits [1:0] of byte 0
    pub action: Action,

    /// Raw metric, hundredths
    pub metric_raw: u16,
}

impl InboundFrame {
    /// Decoded metric value (`metric_raw / 100`).
    #[inline]
    pub fn metric(&self) -> f64 {
        decode_metric(self.metric_raw)
    }

    /// Split into `(action, metric)`.
    #[inline]
    pub fn into_parts(self) -> (Action, f64) {
        (self.action, self.metric())
    }
}

/// Parse an inbound decision frame.
///
/// Returns `None` when fewer than [`INBOUND_FRAME_LEN`] bytes are supplied:
/// a partial frame means "no decision yet", not a protocol error. Bytes past
/// the third are ignored.
///
/// # Example
/// ```
/// use price_bridge::domain::Action;
/// use price_bridge::protocol::parse_inbound_frame;
///
/// let frame = parse_inbound_frame(&[0x01, 0xC8, 0x00]).unwrap();
/// assert_eq!(frame.into_parts(), (Action::Buy, 2.0));
/// assert!(parse_inbound_frame(&[0x01, 0xC8]).is_none());
/// ```
#[inline]
pub fn parse_inbound_frame(buf: &[u8]) -> Option<InboundFrame> {
    let [code, low, high] = *buf.first_chunk::<INBOUND_FRAME_LEN>()?;

    Some(InboundFrame {
        action: Action::from_code(code & ACTION_MASK),
        metric_raw: u16::from_le_bytes([low, high]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_one() {
        assert_eq!(build_outbound_frame(1.0).unwrap(), [0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_outbound_is_big_endian() {
        // 258.5 -> 0x0102_8000
        let frame = build_outbound_frame(258.5).unwrap();
        assert_eq!(frame, [0x01, 0x02, 0x80, 0x00]);
        assert_eq!(decode_outbound_frame(frame).to_price(), 258.5);
    }

    #[test]
    fn test_outbound_rejects_out_of_range() {
        assert!(build_outbound_frame(-1.0).is_err());
        assert!(build_outbound_frame(70_000.0).is_err());
    }

    #[test]
    fn test_inbound_buy() {
        let frame = parse_inbound_frame(&[0x01, 0xC8, 0x00]).unwrap();
        assert_eq!(frame.action, Action::Buy);
        assert_eq!(frame.metric_raw, 200);
        assert_eq!(frame.metric(), 2.0);
    }

    #[test]
    fn test_inbound_sell_little_endian_metric() {
        let frame = parse_inbound_frame(&[0x02, 0x90, 0x01]).unwrap();
        assert_eq!(frame.into_parts(), (Action::Sell, 4.0));
    }

    #[test]
    fn test_inbound_hold() {
        let frame = parse_inbound_frame(&[0x00, 0x00, 0x00]).unwrap();
        assert_eq!(frame.into_parts(), (Action::Hold, 0.0));
    }

    #[test]
    fn test_inbound_code_three_is_unknown() {
        for (low, high) in [(0x00, 0x00), (0xFF, 0xFF), (0x34, 0x12)] {
            let frame = parse_inbound_frame(&[0x03, low, high]).unwrap();
            assert_eq!(frame.action, Action::Unknown);
        }
    }

    #[test]
    fn test_inbound_ignores_upper_bits() {
        // 0xFD = 0b1111_1101 -> code 01
        let frame = parse_inbound_frame(&[0xFD, 0xC8, 0x00]).unwrap();
        assert_eq!(frame.action, Action::Buy);
    }

    #[test]
    fn test_inbound_partial_frame() {
        assert!(parse_inbound_frame(&[]).is_none());
        assert!(parse_inbound_frame(&[0x01]).is_none());
        assert!(parse_inbound_frame(&[0x01, 0xC8]).is_none());
    }

    #[test]
    fn test_inbound_extra_bytes_ignored() {
        let frame = parse_inbound_frame(&[0x02, 0x90, 0x01, 0xAA]).unwrap();
        assert_eq!(frame.into_parts(), (Action::Sell, 4.0));
    }
}
