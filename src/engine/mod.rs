// ============================================================================
// Engine Module
// Contains the poll-loop business logic
// ============================================================================

mod bridge;

pub mod factory;

pub use bridge::{Bridge, CycleOutcome};
pub use factory::BridgeBuilder;
