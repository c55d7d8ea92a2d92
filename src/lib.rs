// ============================================================================
// Price Bridge Library
// Last-close price feed -> Q16.16 UART frames -> FPGA trading decisions
// ============================================================================

//! # Price Bridge
//!
//! Host-side controller for a fixed-point FPGA decision engine.
//!
//! ## Features
//!
//! - **Q16.16 codec** for prices, hundredths codec for the decision metric
//! - **Fixed-length UART frames**: 4-byte big-endian price out, 3-byte decision in
//! - **Pluggable collaborators** for the price source and the transport
//! - **No-transport mode** when the serial link is unavailable
//!
//! ## Wire format
//!
//! | Direction    | Bytes | Layout                                               |
//! |--------------|-------|------------------------------------------------------|
//! | host -> FPGA | 4     | Q16.16 price, big-endian                             |
//! | FPGA -> host | 3     | `[0] & 0x03` action, `[1..3]` metric (little-endian) |
//!
//! ## Example
//!
//! ```rust
//! use price_bridge::prelude::*;
//!
//! // Price out
//! assert_eq!(encode_price(1.0), Ok(0x0001_0000));
//! assert_eq!(build_outbound_frame(1.0).unwrap(), [0x00, 0x01, 0x00, 0x00]);
//!
//! // Decision in
//! let frame = parse_inbound_frame(&[0x02, 0x90, 0x01]).unwrap();
//! assert_eq!(frame.action, Action::Sell);
//! assert_eq!(frame.metric(), 4.0);
//! ```

pub mod adapters;
pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod protocol;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{Action, BridgeConfig, Decision, PolygonConfig, SerialConfig};
    pub use crate::engine::{Bridge, BridgeBuilder, CycleOutcome};
    pub use crate::interfaces::{
        BridgeEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, PriceSource,
        PriceSourceError, Transport, TransportError, TransportResult,
    };
    pub use crate::numeric::{decode_metric, decode_price, encode_price, NumericError, Q16};
    pub use crate::protocol::{build_outbound_frame, parse_inbound_frame, InboundFrame};

    #[cfg(feature = "http")]
    pub use crate::adapters::PolygonPriceSource;
    #[cfg(feature = "serial")]
    pub use crate::adapters::SerialTransport;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::protocol::{decode_outbound_frame, INBOUND_FRAME_LEN, OUTBOUND_FRAME_LEN};
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::time::Duration;

    /// Stand-in for the FPGA: decodes each price frame and answers BUY when
    /// the price is under a threshold, SELL otherwise, with the price in
    /// hundredths as the metric.
    struct ThresholdFpga {
        threshold: f64,
        rx: VecDeque<u8>,
    }

    impl Transport for ThresholdFpga {
        fn name(&self) -> &str {
            "fpga-model"
        }

        fn write_all(&mut self, bytes: &[u8]) -> TransportResult<()> {
            let frame: [u8; OUTBOUND_FRAME_LEN] = bytes
                .try_into()
                .map_err(|_| TransportError::Io(std::io::ErrorKind::InvalidData.into()))?;
            let price = decode_outbound_frame(frame).to_price();

            let code = if price < self.threshold { 1 } else { 2 };
            let metric = ((price * 100.0) as u16).to_le_bytes();
            self.rx.extend([code, metric[0], metric[1]]);
            Ok(())
        }

        fn bytes_available(&mut self) -> TransportResult<usize> {
            Ok(self.rx.len())
        }

        fn read_exact(&mut self, buf: &mut [u8]) -> TransportResult<()> {
            for slot in buf.iter_mut() {
                *slot = self.rx.pop_front().ok_or(TransportError::Closed)?;
            }
            Ok(())
        }
    }

    struct Ladder {
        prices: std::sync::Mutex<VecDeque<f64>>,
    }

    impl PriceSource for Ladder {
        fn name(&self) -> &str {
            "ladder"
        }

        fn latest_price(&self, symbol: &str) -> Result<f64, PriceSourceError> {
            self.prices
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| PriceSourceError::NoData(symbol.to_string()))
        }
    }

    #[test]
    fn test_end_to_end_decisions() {
        let mut bridge = BridgeBuilder::new(BridgeConfig::new("AAPL", Duration::from_millis(1)))
            .price_source(Box::new(Ladder {
                prices: std::sync::Mutex::new(VecDeque::from(vec![150.25, 250.5])),
            }))
            .transport(Box::new(ThresholdFpga {
                threshold: 200.0,
                rx: VecDeque::new(),
            }))
            .event_handler(Arc::new(NoOpEventHandler))
            .build()
            .unwrap();

        match bridge.poll_once() {
            CycleOutcome::Sent {
                decision: Some(decision),
                value,
                ..
            } => {
                assert_eq!(value.to_price(), 150.25);
                assert_eq!(decision.action, Action::Buy);
                assert_eq!(decision.metric, 150.25);
            },
            other => panic!("unexpected outcome: {:?}", other),
        }

        match bridge.poll_once() {
            CycleOutcome::Sent {
                decision: Some(decision),
                ..
            } => {
                assert_eq!(decision.action, Action::Sell);
                assert_eq!(decision.metric, 250.5);
            },
            other => panic!("unexpected outcome: {:?}", other),
        }

        // Source exhausted
        assert_eq!(bridge.poll_once(), CycleOutcome::NoPrice);
    }

    #[test]
    fn test_frame_lengths() {
        assert_eq!(OUTBOUND_FRAME_LEN, 4);
        assert_eq!(INBOUND_FRAME_LEN, 3);
    }
}
