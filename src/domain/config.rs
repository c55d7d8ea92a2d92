// ============================================================================
// Bridge Configuration
// Poll loop, serial link and price source settings
// ============================================================================

use std::time::Duration;

// ============================================================================
// Poll Loop
// ============================================================================

/// Configuration for the poll loop
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Ticker to poll (e.g., "AAPL", "MSFT")
    pub symbol: String,

    /// Wait between the end of one cycle and the start of the next
    pub poll_interval: Duration,

    /// Wait between sending a price frame and checking for the reply
    pub settle_delay: Duration,

    /// Wait after opening the transport, while the FPGA comes out of reset
    pub reset_delay: Duration,
}

impl BridgeConfig {
    /// Create a configuration with zero delays
    pub fn new(symbol: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            symbol: symbol.into(),
            poll_interval,
            settle_delay: Duration::ZERO,
            reset_delay: Duration::ZERO,
        }
    }

    /// Builder method: Set post-transmit settling delay
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Builder method: Set FPGA reset delay
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("Symbol cannot be empty".to_string());
        }

        if !self.symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == ':') {
            return Err(format!("Invalid symbol: {}", self.symbol));
        }

        if self.poll_interval.is_zero() {
            return Err("Poll interval must be positive".to_string());
        }

        Ok(())
    }
}

impl BridgeConfig {
    /// Defaults for the FPGA accelerator board
    /// - Poll every 5 s
    /// - 500 ms settling after each price frame
    /// - 2 s reset wait after opening the port
    pub fn fpga_defaults(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Duration::from_secs(5))
            .with_settle_delay(Duration::from_millis(500))
            .with_reset_delay(Duration::from_secs(2))
    }
}

// ============================================================================
// Serial Link
// ============================================================================

/// UART settings (8 data bits, no parity, 1 stop bit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device name (e.g., "/dev/ttyUSB0", "COM3")
    pub port: String,

    /// Line rate in baud
    pub baud_rate: u32,

    /// Read timeout for blocking reads
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            timeout: Duration::from_secs(1),
        }
    }

    /// Builder method: Set read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.port.is_empty() {
            return Err("Serial port cannot be empty".to_string());
        }
        if self.baud_rate == 0 {
            return Err("Baud rate must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new("/dev/ttyUSB0", 9600)
    }
}

// ============================================================================
// Price Source
// ============================================================================

/// Default Polygon.io REST endpoint
pub const POLYGON_BASE_URL: &str = "https://api.polygon.io";

/// Settings for the previous-close price API.
///
/// No default API key; it must be supplied at start-up.
#[derive(Clone, PartialEq, Eq)]
pub struct PolygonConfig {
    /// API key appended to every request
    pub api_key: String,

    /// Base URL (overridable for testing against a local server)
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl PolygonConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: POLYGON_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Builder method: Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder method: Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key cannot be empty".to_string());
        }
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }
        if self.timeout.is_zero() {
            return Err("Timeout must be positive".to_string());
        }
        Ok(())
    }
}

// Keep the key out of logs
impl std::fmt::Debug for PolygonConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpga_defaults() {
        let config = BridgeConfig::fpga_defaults("AAPL");

        assert_eq!(config.symbol, "AAPL");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.settle_delay, Duration::from_millis(500));
        assert_eq!(config.reset_delay, Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bridge_validation() {
        assert!(BridgeConfig::new("", Duration::from_secs(1)).validate().is_err());
        assert!(BridgeConfig::new("MS FT", Duration::from_secs(1)).validate().is_err());
        assert!(BridgeConfig::new("MSFT", Duration::ZERO).validate().is_err());
        assert!(BridgeConfig::new("BRK.B", Duration::from_secs(1)).validate().is_ok());
    }

    #[test]
    fn test_serial_defaults() {
        let config = SerialConfig::default();
        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert!(SerialConfig::new("/dev/ttyUSB0", 0).validate().is_err());
    }

    #[test]
    fn test_polygon_validation() {
        assert!(PolygonConfig::new("").validate().is_err());
        assert!(PolygonConfig::new("key").validate().is_ok());
        assert!(PolygonConfig::new("key")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_polygon_debug_redacts_key() {
        let config = PolygonConfig::new("super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
