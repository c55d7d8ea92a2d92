// ============================================================================
// Numeric Errors
// Error types for fixed-point price encoding
// ============================================================================

use std::fmt;

/// Errors that can occur while encoding a price into Q16.16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Scaled price exceeded u32::MAX (price >= 65536.0)
    Overflow,
    /// Price was below zero
    Negative,
    /// Price was NaN or infinite
    NotFinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "price overflow: value does not fit in Q16.16 (max 65535.99998)")
            },
            NumericError::Negative => write!(f, "negative price cannot be encoded as Q16.16"),
            NumericError::NotFinite => write!(f, "price is not a finite number"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
