// ============================================================================
// Bridge Factory
// Creates bridges with validated configuration
// ============================================================================

use crate::domain::BridgeConfig;
use crate::engine::Bridge;
use crate::interfaces::{EventHandler, LoggingEventHandler, PriceSource, Transport};
use std::sync::Arc;

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating bridges with fluent API
///
/// # Example
/// ```
/// use price_bridge::prelude::*;
/// use std::sync::Arc;
///
/// struct Fixed;
///
/// impl PriceSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn latest_price(&self, _symbol: &str) -> Result<f64, PriceSourceError> {
///         Ok(189.25)
///     }
/// }
///
/// let mut bridge = BridgeBuilder::new(BridgeConfig::fpga_defaults("AAPL"))
///     .price_source(Box::new(Fixed))
///     .event_handler(Arc::new(NoOpEventHandler))
///     .build()
///     .unwrap();
///
/// assert_eq!(bridge.poll_once(), CycleOutcome::PriceOnly { price: 189.25 });
/// ```
pub struct BridgeBuilder {
    config: BridgeConfig,
    source: Option<Box<dyn PriceSource>>,
    transport: Option<Box<dyn Transport>>,
    event_handler: Arc<dyn EventHandler>,
}

impl BridgeBuilder {
    /// Create a new builder; events default to `LoggingEventHandler`
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            source: None,
            transport: None,
            event_handler: Arc::new(LoggingEventHandler),
        }
    }

    /// Set the price source (required)
    pub fn price_source(mut self, source: Box<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach a transport
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Attach a transport if one could be opened; `None` keeps
    /// no-transport mode
    pub fn maybe_transport(mut self, transport: Option<Box<dyn Transport>>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the event handler
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    /// Build the bridge
    pub fn build(self) -> Result<Bridge, String> {
        self.config.validate()?;

        let source = self
            .source
            .ok_or_else(|| "Price source is required".to_string())?;

        Ok(Bridge::new(
            self.config,
            source,
            self.transport,
            self.event_handler,
        ))
    }
}
