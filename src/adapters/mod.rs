// ============================================================================
// Adapters Module
// Concrete price sources and transports
// ============================================================================

#[cfg(feature = "http")]
mod polygon;
#[cfg(feature = "serial")]
mod serial;

#[cfg(feature = "http")]
pub use polygon::PolygonPriceSource;
#[cfg(feature = "serial")]
pub use serial::SerialTransport;
