// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod price_source;
mod transport;

pub use event_handler::{BridgeEvent, EventHandler, LoggingEventHandler, NoOpEventHandler};
pub use price_source::{PriceSource, PriceSourceError};
pub use transport::{Transport, TransportError, TransportResult};
