// ============================================================================
// Bridge
// Single-threaded poll loop: fetch -> encode -> transmit -> settle -> decode
// ============================================================================

use crate::domain::{BridgeConfig, Decision};
use crate::interfaces::{BridgeEvent, EventHandler, PriceSource, Transport};
use crate::numeric::Q16;
use crate::protocol::encode_q16;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Granularity at which waits check the shutdown flag
const SHUTDOWN_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Result of a single poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Price source failed, nothing else happened
    NoPrice,

    /// No transport attached, price was only logged
    PriceOnly { price: f64 },

    /// Price could not be represented in Q16.16
    Rejected { price: f64 },

    /// Frame sent; `decision` is `None` when no full reply was buffered
    Sent {
        price: f64,
        value: Q16,
        decision: Option<Decision>,
    },

    /// Transport failed while sending or reading
    TransportFault { price: f64 },
}

/// Poll-loop driver owning the price source and the transport
pub struct Bridge {
    /// Loop settings
    config: BridgeConfig,

    /// Where prices come from
    source: Box<dyn PriceSource>,

    /// Link to the FPGA; `None` runs the loop in no-transport mode
    transport: Option<Box<dyn Transport>>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl Bridge {
    /// Create a new bridge
    pub fn new(
        config: BridgeConfig,
        source: Box<dyn PriceSource>,
        transport: Option<Box<dyn Transport>>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            config,
            source,
            transport,
            event_handler,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// True while a transport is attached
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Run one request/response cycle.
    ///
    /// Every failure is absorbed into the returned outcome; nothing here is
    /// fatal to the loop.
    pub fn poll_once(&mut self) -> CycleOutcome {
        let symbol = self.config.symbol.clone();

        let price = match self.source.latest_price(&symbol) {
            Ok(price) => price,
            Err(e) => {
                self.emit(BridgeEvent::PriceUnavailable {
                    symbol,
                    reason: e.to_string(),
                    timestamp: Utc::now(),
                });
                return CycleOutcome::NoPrice;
            },
        };

        self.emit(BridgeEvent::PriceReceived {
            symbol: symbol.clone(),
            price,
            timestamp: Utc::now(),
        });

        let Some(transport) = self.transport.as_mut() else {
            self.emit(BridgeEvent::TransportSkipped {
                symbol,
                timestamp: Utc::now(),
            });
            return CycleOutcome::PriceOnly { price };
        };

        let value = match Q16::from_price(price) {
            Ok(value) => value,
            Err(error) => {
                self.emit(BridgeEvent::PriceRejected {
                    symbol,
                    price,
                    error,
                    timestamp: Utc::now(),
                });
                return CycleOutcome::Rejected { price };
            },
        };

        if let Err(e) = transport.write_all(&encode_q16(value)) {
            self.emit(BridgeEvent::TransportFault {
                reason: e.to_string(),
                timestamp: Utc::now(),
            });
            return CycleOutcome::TransportFault { price };
        }

        self.emit(BridgeEvent::FrameSent {
            price,
            value,
            timestamp: Utc::now(),
        });

        if !self.config.settle_delay.is_zero() {
            thread::sleep(self.config.settle_delay);
        }

        let reply = match self.transport.as_mut() {
            Some(transport) => transport.poll_frame(),
            None => Ok(None),
        };

        match reply {
            Ok(Some(frame)) => {
                let decision = Decision::from_frame(symbol, price, frame);
                self.emit(BridgeEvent::DecisionReceived {
                    decision: decision.clone(),
                });
                CycleOutcome::Sent {
                    price,
                    value,
                    decision: Some(decision),
                }
            },
            Ok(None) => {
                self.emit(BridgeEvent::NoDecision {
                    symbol,
                    timestamp: Utc::now(),
                });
                CycleOutcome::Sent {
                    price,
                    value,
                    decision: None,
                }
            },
            Err(e) => {
                self.emit(BridgeEvent::TransportFault {
                    reason: e.to_string(),
                    timestamp: Utc::now(),
                });
                CycleOutcome::TransportFault { price }
            },
        }
    }

    /// Run cycles until `shutdown` is set, then release the transport.
    ///
    /// Waits are sliced so the flag is observed within
    /// `SHUTDOWN_CHECK_INTERVAL`. Returns the number of completed cycles.
    pub fn run(&mut self, shutdown: &AtomicBool) -> u64 {
        let mut cycles = 0;

        if self.has_transport() && !self.config.reset_delay.is_zero() {
            tracing::debug!("Waiting {:?} for FPGA reset", self.config.reset_delay);
            sleep_unless(shutdown, self.config.reset_delay);
        }

        self.emit(BridgeEvent::Started {
            symbol: self.config.symbol.clone(),
            source: self.source.name().to_string(),
            poll_interval_secs: self.config.poll_interval.as_secs_f64(),
            transport: self.transport.as_ref().map(|t| t.name().to_string()),
            timestamp: Utc::now(),
        });

        while !shutdown.load(Ordering::Acquire) {
            self.poll_once();
            cycles += 1;

            if sleep_unless(shutdown, self.config.poll_interval) {
                break;
            }
        }

        self.emit(BridgeEvent::Stopped {
            timestamp: Utc::now(),
        });
        self.close();

        cycles
    }

    /// Close and drop the transport. Safe to call more than once.
    pub fn close(&mut self) {
        let Some(mut transport) = self.transport.take() else {
            return;
        };

        if let Err(e) = transport.close() {
            tracing::warn!("Error while closing {}: {}", transport.name(), e);
        }

        self.emit(BridgeEvent::TransportClosed {
            name: transport.name().to_string(),
            timestamp: Utc::now(),
        });
    }

    fn emit(&self, event: BridgeEvent) {
        self.event_handler.on_event(event);
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sleep for `total` unless `shutdown` gets set. Returns true if interrupted.
///
/// A `total` too large to add to the current instant waits until shutdown.
fn sleep_unless(shutdown: &AtomicBool, total: Duration) -> bool {
    let deadline = Instant::now().checked_add(total);

    loop {
        if shutdown.load(Ordering::Acquire) {
            return true;
        }

        let step = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return false;
                }
                (deadline - now).min(SHUTDOWN_CHECK_INTERVAL)
            },
            None => SHUTDOWN_CHECK_INTERVAL,
        };

        thread::sleep(step);
    }
}
