// ============================================================================
// Trading Action
// 2-bit decision code reported by the FPGA
// ============================================================================

use std::fmt;

/// Trading decision carried in bits [1:0] of the inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Code 0: keep current position
    Hold,
    /// Code 1: buy signal
    Buy,
    /// Code 2: sell signal
    Sell,
    /// Any other code (3 after masking)
    Unknown,
}

impl Action {
    /// Map an action code to an action. Codes other than 0, 1, 2 are `Unknown`.
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Action::Hold,
            1 => Action::Buy,
            2 => Action::Sell,
            _ => Action::Unknown,
        }
    }

    /// Upper-case label used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Hold => "HOLD",
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Unknown => "UNKNOWN",
        }
    }

    /// True for BUY and SELL.
    #[inline]
    pub const fn is_signal(&self) -> bool {
        matches!(self, Action::Buy | Action::Sell)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
