// ============================================================================
// Domain Models Module
// Contains the decision model and bridge configuration
// ============================================================================

pub mod action;
pub mod config;
pub mod decision;

pub use action::Action;
pub use config::{BridgeConfig, PolygonConfig, SerialConfig, POLYGON_BASE_URL};
pub use decision::Decision;
