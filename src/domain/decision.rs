// ============================================================================
// Decision Domain Model
// ============================================================================

use crate::protocol::InboundFrame;
use chrono::{DateTime, Utc};

use super::Action;

/// Trading decision received from the FPGA during one poll cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Instrument the decision refers to
    pub symbol: String,

    /// Price that was sent to the FPGA
    pub price: f64,

    /// Decoded action
    pub action: Action,

    /// Decision-quality metric (two decimal digits)
    pub metric: f64,

    /// Time the reply frame was read
    pub timestamp: DateTime<Utc>,
}

impl Decision {
    pub fn from_frame(symbol: impl Into<String>, price: f64, frame: InboundFrame) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            action: frame.action,
            metric: frame.metric(),
            timestamp: Utc::now(),
        }
    }
}
