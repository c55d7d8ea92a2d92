// ============================================================================
// Event Handler Interface
// Defines the contract for handling bridge events
// ============================================================================

use crate::domain::{Action, Decision};
use crate::numeric::{NumericError, Q16};
use chrono::{DateTime, Local, Utc};

/// Events emitted by the bridge
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// Poll loop started
    Started {
        symbol: String,
        source: String,
        poll_interval_secs: f64,
        transport: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// Price fetched from the source
    PriceReceived {
        symbol: String,
        price: f64,
        timestamp: DateTime<Utc>,
    },

    /// Source had no price this cycle
    PriceUnavailable {
        symbol: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Price outside the Q16.16 range, not sent
    PriceRejected {
        symbol: String,
        price: f64,
        error: NumericError,
        timestamp: DateTime<Utc>,
    },

    /// Price frame written to the transport
    FrameSent {
        price: f64,
        value: Q16,
        timestamp: DateTime<Utc>,
    },

    /// Decision frame read from the transport
    DecisionReceived { decision: Decision },

    /// No complete reply frame after the settling delay
    NoDecision {
        symbol: String,
        timestamp: DateTime<Utc>,
    },

    /// Running without a transport, framing skipped
    TransportSkipped {
        symbol: String,
        timestamp: DateTime<Utc>,
    },

    /// Transport I/O failed during a cycle
    TransportFault {
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Transport released
    TransportClosed {
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// Poll loop stopped
    Stopped { timestamp: DateTime<Utc> },
}

/// Receives every event the bridge emits, in order, on the polling thread
pub trait EventHandler: Send + Sync {
    /// Handle a bridge event
    fn on_event(&self, event: BridgeEvent);
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: BridgeEvent) {
        // Do nothing
    }
}

/// Notice logged for an actionable decision
fn signal_notice(action: Action) -> Option<&'static str> {
    match action {
        Action::Buy => Some("BUY SIGNAL - Would execute buy order"),
        Action::Sell => Some("SELL SIGNAL - Would execute sell order"),
        Action::Hold | Action::Unknown => None,
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: BridgeEvent) {
        match event {
            BridgeEvent::Started {
                symbol,
                source,
                poll_interval_secs,
                transport,
                ..
            } => {
                match transport {
                    Some(name) => tracing::info!("Connected to {}", name),
                    None => tracing::info!("Running in test mode (no FPGA communication)"),
                }
                tracing::info!(
                    "Trading {} from {} with {}s interval",
                    symbol,
                    source,
                    poll_interval_secs
                );
            },
            BridgeEvent::PriceReceived {
                symbol,
                price,
                timestamp,
            } => {
                let local = timestamp.with_timezone(&Local);
                tracing::info!("[{}] {}: ${:.2}", local.format("%H:%M:%S"), symbol, price);
            },
            BridgeEvent::PriceUnavailable { symbol, reason, .. } => {
                tracing::warn!("No price for {}: {}", symbol, reason);
            },
            BridgeEvent::PriceRejected {
                symbol,
                price,
                error,
                ..
            } => {
                tracing::warn!("Not sending {} price {}: {}", symbol, price, error);
            },
            BridgeEvent::FrameSent { price, value, .. } => {
                tracing::info!("Sent: ${:.2} ({})", price, value);
            },
            BridgeEvent::DecisionReceived { decision } => {
                tracing::info!("Decision: {} | Metric: {:.2}", decision.action, decision.metric);
                if let Some(notice) = signal_notice(decision.action) {
                    tracing::info!("{}", notice);
                }
            },
            BridgeEvent::NoDecision { symbol, .. } => {
                tracing::debug!("No decision frame yet for {}", symbol);
            },
            BridgeEvent::TransportSkipped { .. } => {
                tracing::info!("(Test mode - no FPGA communication)");
            },
            BridgeEvent::TransportFault { reason, .. } => {
                tracing::error!("Transport error: {}", reason);
            },
            BridgeEvent::TransportClosed { name, .. } => {
                tracing::info!("Transport {} closed", name);
            },
            BridgeEvent::Stopped { .. } => {
                tracing::info!("Bridge stopped");
            },
        }
    }
}
