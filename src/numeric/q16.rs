// ============================================================================
// Q16.16 Fixed-Point Codec
// Price <-> unsigned 32-bit fixed point, metric <-> hundredths
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

/// Number of fractional bits in the Q16.16 format.
pub const FRACTIONAL_BITS: u32 = 16;

/// Scale factor (2^16) between a price and its Q16.16 raw value.
pub const Q16_SCALE: f64 = (1u32 << FRACTIONAL_BITS) as f64;

/// Smallest representable price step (1/65536).
pub const Q16_RESOLUTION: f64 = 1.0 / Q16_SCALE;

/// Scale factor between a decision metric and its raw wire value.
pub const METRIC_SCALE: f64 = 100.0;

// ============================================================================
// Free Functions (wire codec)
// ============================================================================

/// Encode a price as Q16.16: `floor(price * 65536)`.
///
/// The format has no sign bit and 16 integer bits, so prices must lie in
/// `[0, 65536)`. Anything outside that range is rejected instead of being
/// silently wrapped. Prices below 1/65536 encode to zero.
///
/// # Errors
/// - `NotFinite` for NaN or infinities
/// - `Negative` for prices below zero
/// - `Overflow` for prices >= 65536.0
///
/// # Example
/// ```
/// use price_bridge::numeric::encode_price;
///
/// assert_eq!(encode_price(1.0), Ok(0x0001_0000));
/// assert_eq!(encode_price(0.5), Ok(0x0000_8000));
/// ```
#[inline]
pub fn encode_price(price: f64) -> NumericResult<u32> {
    if !price.is_finite() {
        return Err(NumericError::NotFinite);
    }
    if price < 0.0 {
        return Err(NumericError::Negative);
    }

    // Multiplying by a power of two is exact in f64
    let scaled = (price * Q16_SCALE).floor();
    if scaled > u32::MAX as f64 {
        return Err(NumericError::Overflow);
    }

    Ok(scaled as u32)
}

/// Decode a Q16.16 raw value back into a price (`raw / 65536`).
#[inline]
pub fn decode_price(raw: u32) -> f64 {
    raw as f64 / Q16_SCALE
}

/// Decode a raw decision metric (`raw / 100`).
///
/// The metric only ever travels FPGA -> host, so there is no encoder.
#[inline]
pub fn decode_metric(raw: u16) -> f64 {
    raw as f64 / METRIC_SCALE
}

// ============================================================================
// Q16 Value Type
// ============================================================================

/// Unsigned Q16.16 fixed-point value.
///
/// High 16 bits hold the integer part, low 16 bits the fraction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Q16(u32);

impl Q16 {
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(1 << FRACTIONAL_BITS);

    /// Maximum representable value (65535.99998...)
    pub const MAX: Self = Self(u32::MAX);

    /// Create from a raw wire value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Create from a price, see [`encode_price`].
    #[inline]
    pub fn from_price(price: f64) -> NumericResult<Self> {
        encode_price(price).map(Self)
    }

    /// Get the raw wire value.
    #[inline]
    pub const fn raw_value(self) -> u32 {
        self.0
    }

    /// Convert back to a floating-point price.
    #[inline]
    pub fn to_price(self) -> f64 {
        decode_price(self.0)
    }

    /// Integer part (high 16 bits).
    #[inline]
    pub const fn integer_part(self) -> u16 {
        (self.0 >> FRACTIONAL_BITS) as u16
    }

    /// Fractional part in units of 1/65536 (low 16 bits).
    #[inline]
    pub const fn fractional_part(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }
}

impl fmt::Debug for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q16({}, raw=0x{:08X})", self.to_price(), self.0)
    }
}

impl fmt::Display for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl TryFrom<f64> for Q16 {
    type Error = NumericError;

    fn try_from(price: f64) -> Result<Self, Self::Error> {
        Self::from_price(price)
    }
}

impl From<Q16> for f64 {
    fn from(value: Q16) -> Self {
        value.to_price()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constants() {
        assert_eq!(Q16_SCALE, 65536.0);
        assert_eq!(Q16::ONE.raw_value(), 0x0001_0000);
        assert_eq!(Q16::MAX.raw_value(), u32::MAX);
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode_price(1.0), Ok(65536));
        assert_eq!(encode_price(0.5), Ok(32768));
        assert_eq!(encode_price(0.0), Ok(0));
        assert_eq!(encode_price(189.25), Ok(189 * 65536 + 16384));
    }

    #[test]
    fn test_encode_truncates_toward_zero() {
        // 0.01 * 65536 = 655.36
        assert_eq!(encode_price(0.01), Ok(655));
        // Below one step
        assert_eq!(encode_price(Q16_RESOLUTION / 2.0), Ok(0));
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert_eq!(encode_price(-0.01), Err(NumericError::Negative));
        assert_eq!(encode_price(65536.0), Err(NumericError::Overflow));
        assert_eq!(encode_price(1.0e9), Err(NumericError::Overflow));
        assert_eq!(encode_price(f64::NAN), Err(NumericError::NotFinite));
        assert_eq!(encode_price(f64::INFINITY), Err(NumericError::NotFinite));
    }

    #[test]
    fn test_encode_upper_edge() {
        let top = decode_price(u32::MAX);
        assert_eq!(encode_price(top), Ok(u32::MAX));
    }

    #[test]
    fn test_decode_metric() {
        assert_eq!(decode_metric(200), 2.0);
        assert_eq!(decode_metric(400), 4.0);
        assert_eq!(decode_metric(0), 0.0);
        assert_eq!(decode_metric(7123), 71.23);
    }

    #[test]
    fn test_q16_parts() {
        let x = Q16::from_price(3.75).unwrap();
        assert_eq!(x.integer_part(), 3);
        assert_eq!(x.fractional_part(), 0xC000);
        assert_eq!(x.to_string(), "0x0003C000");
        assert_eq!(f64::from(x), 3.75);
    }

    #[test]
    fn test_q16_try_from() {
        assert_eq!(Q16::try_from(1.0), Ok(Q16::ONE));
        assert!(Q16::try_from(-1.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_exact_multiples_round_trip(raw in any::<u32>()) {
            let price = decode_price(raw);
            prop_assert_eq!(encode_price(price), Ok(raw));
            prop_assert_eq!(decode_price(raw), price);
        }

        #[test]
        fn prop_encode_error_below_one_step(price in 0.0f64..65535.99) {
            let decoded = decode_price(encode_price(price).unwrap());
            prop_assert!(decoded <= price);
            prop_assert!(price - decoded < Q16_RESOLUTION);
        }
    }
}
