// ============================================================================
// Numeric Module
// Fixed-point codec shared with the FPGA decision engine
// ============================================================================
//
// This module provides:
// - Q16: unsigned Q16.16 fixed-point value (16 integer bits, 16 fraction bits)
// - encode_price / decode_price: float price <-> raw Q16.16 u32
// - decode_metric: raw u16 metric -> hundredths
// - NumericError: rejection reasons for prices outside the format's range
//
// Design principles:
// - Out-of-range prices are rejected, never wrapped
// - Truncation (floor) matches the hardware's view of the price

mod errors;
mod q16;

pub use errors::{NumericError, NumericResult};
pub use q16::{
    decode_metric, decode_price, encode_price, Q16, FRACTIONAL_BITS, METRIC_SCALE, Q16_RESOLUTION,
    Q16_SCALE,
};
