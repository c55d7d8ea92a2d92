// ============================================================================
// Price Source Interface
// Defines the contract for last-close price providers
// ============================================================================

use std::fmt;

/// Errors raised while fetching a price
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSourceError {
    /// Request could not be sent or timed out
    Http(String),

    /// Server answered with a non-success status
    Status(u16),

    /// Body was not the expected JSON document
    Malformed(String),

    /// Response carried no close price for the symbol
    NoData(String),

    /// Source settings were rejected at construction
    InvalidConfig(String),
}

impl fmt::Display for PriceSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSourceError::Http(e) => write!(f, "request failed: {}", e),
            PriceSourceError::Status(code) => write!(f, "API error: HTTP {}", code),
            PriceSourceError::Malformed(e) => write!(f, "malformed response: {}", e),
            PriceSourceError::NoData(symbol) => write!(f, "no close price for {}", symbol),
            PriceSourceError::InvalidConfig(e) => write!(f, "invalid price source config: {}", e),
        }
    }
}

impl std::error::Error for PriceSourceError {}

/// Provider of the most recent close price for a symbol
pub trait PriceSource: Send {
    /// Get the provider name for logging
    fn name(&self) -> &str;

    /// Fetch the latest close price for `symbol`
    fn latest_price(&self, symbol: &str) -> Result<f64, PriceSourceError>;
}
