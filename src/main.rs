// ============================================================================
// Price Bridge CLI
// Polls a previous-close price and exchanges frames with the FPGA
// ============================================================================
//
// Usage:
//
//     # Normal run against the board
//     POLYGON_API_KEY=... price-bridge --port /dev/ttyUSB0 --baud 9600 --ticker AAPL
//
//     # Without hardware
//     price-bridge --test --ticker MSFT --interval 10
//
// A `.env` file in the working directory is loaded before parsing, so the
// API key can live there instead of the shell environment.
// ============================================================================

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use price_bridge::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "price-bridge")]
#[command(version)]
#[command(about = "Sends Q16.16 stock prices to an FPGA decision engine over UART")]
struct Cli {
    /// Serial port connected to the FPGA [default: /dev/ttyUSB0]
    #[arg(long)]
    port: Option<String>,

    /// UART baud rate [default: 9600]
    #[arg(long)]
    baud: Option<u32>,

    /// Stock ticker to poll
    #[arg(long, default_value = "AAPL")]
    ticker: String,

    /// Poll interval in seconds [default: 5]
    #[arg(long)]
    interval: Option<f64>,

    /// Wait after sending a price before checking for a reply, in milliseconds [default: 500]
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Wait after opening the port for the FPGA to come out of reset, in milliseconds [default: 2000]
    #[arg(long)]
    reset_ms: Option<u64>,

    /// Run without the serial port (prices are only logged)
    #[arg(long)]
    test: bool,

    /// Polygon.io API key
    #[arg(long, env = "POLYGON_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Polygon.io base URL
    #[arg(long, env = "POLYGON_BASE_URL", default_value = price_bridge::domain::POLYGON_BASE_URL)]
    base_url: String,
}

fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

/// Board presets from `BridgeConfig::fpga_defaults`, overridden by any flags given
fn bridge_config(cli: &Cli) -> Result<BridgeConfig> {
    let mut config = BridgeConfig::fpga_defaults(cli.ticker.to_uppercase());

    if let Some(secs) = cli.interval {
        config.poll_interval = Duration::try_from_secs_f64(secs)
            .context("--interval must be a non-negative number of seconds")?;
    }
    if let Some(ms) = cli.settle_ms {
        config.settle_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = cli.reset_ms {
        config.reset_delay = Duration::from_millis(ms);
    }

    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;
    Ok(config)
}

fn serial_config(cli: &Cli) -> SerialConfig {
    let mut config = SerialConfig::default();
    if let Some(port) = &cli.port {
        config.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.baud_rate = baud;
    }
    config
}

fn open_transport(cli: &Cli) -> Option<Box<dyn Transport>> {
    if cli.test {
        return None;
    }

    match SerialTransport::open(&serial_config(cli)) {
        Ok(transport) => Some(Box::new(transport)),
        Err(e) => {
            tracing::error!("Error opening serial port: {}", e);
            tracing::warn!("Falling back to test mode (no FPGA communication)");
            None
        },
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    setup_logger();

    let config = bridge_config(&cli)?;

    let source = PolygonPriceSource::new(
        PolygonConfig::new(cli.api_key.as_str()).with_base_url(cli.base_url.as_str()),
    )
    .context("failed to set up price source")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::Release))
            .context("failed to install Ctrl+C handler")?;
    }

    let mut bridge = BridgeBuilder::new(config)
        .price_source(Box::new(source))
        .maybe_transport(open_transport(&cli))
        .event_handler(Arc::new(LoggingEventHandler))
        .build()
        .map_err(|e| anyhow!("failed to build bridge: {}", e))?;

    tracing::info!("Press Ctrl+C to stop");
    let cycles = bridge.run(&shutdown);
    tracing::debug!("Completed {} poll cycles", cycles);

    Ok(())
}
