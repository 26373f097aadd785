use kube_quantity::ParsedQuantity;
use thiserror::Error;

use crate::NANOS_PER_UNIT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseQuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("invalid quantity {input:?}: {reason}")]
    Invalid { input: String, reason: String },

    #[error("quantity {0:?} is out of range")]
    OutOfRange(String),
}

/// Parse a Kubernetes quantity into nano-units.
///
/// The grammar (`[+-] digits [. digits] [suffix]`, binary SI, decimal SI or
/// decimal exponent) is handled by [`ParsedQuantity`]. Precision below one
/// nano-unit is rounded away from zero, as the API server does.
pub(crate) fn parse_nanos(input: &str) -> Result<i128, ParseQuantityError> {
    if input.is_empty() {
        return Err(ParseQuantityError::Empty);
    }
    let parsed = ParsedQuantity::try_from(input).map_err(|e| ParseQuantityError::Invalid {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    let value = parsed
        .to_bytes_f64()
        .ok_or_else(|| ParseQuantityError::OutOfRange(input.to_string()))?;
    to_nanos(value).ok_or_else(|| ParseQuantityError::OutOfRange(input.to_string()))
}

/// Round a value in whole units to nano-units.
///
/// Values within float noise of a whole nano-unit snap to it; anything
/// further away is a genuine sub-nano remainder and rounds away from zero.
fn to_nanos(value: f64) -> Option<i128> {
    let scaled = value * NANOS_PER_UNIT as f64;
    if !scaled.is_finite() || scaled.abs() >= i128::MAX as f64 {
        return None;
    }
    let nearest = scaled.round();
    let tolerance = f64::EPSILON * 16.0 * scaled.abs().max(1.0);
    let nanos = if (scaled - nearest).abs() <= tolerance {
        nearest
    } else if scaled > 0.0 {
        scaled.ceil()
    } else {
        scaled.floor()
    };
    Some(nanos as i128)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: i128 = NANOS_PER_UNIT;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_nanos("0"), Ok(0));
        assert_eq!(parse_nanos("1"), Ok(UNIT));
        assert_eq!(parse_nanos("-3"), Ok(-3 * UNIT));
        assert_eq!(parse_nanos("0.5"), Ok(500_000_000));
        assert_eq!(parse_nanos("0.001"), Ok(1_000_000));
    }

    #[test]
    fn test_decimal_suffixes() {
        assert_eq!(parse_nanos("100m"), Ok(100_000_000));
        assert_eq!(parse_nanos("250u"), Ok(250_000));
        assert_eq!(parse_nanos("7n"), Ok(7));
        assert_eq!(parse_nanos("1k"), Ok(1_000 * UNIT));
        assert_eq!(parse_nanos("128M"), Ok(128_000_000 * UNIT));
        assert_eq!(parse_nanos("1.5G"), Ok(1_500_000_000 * UNIT));
    }

    #[test]
    fn test_binary_suffixes() {
        assert_eq!(parse_nanos("1Ki"), Ok(1024 * UNIT));
        assert_eq!(parse_nanos("64Mi"), Ok((64 << 20) * UNIT));
        assert_eq!(parse_nanos("0.5Gi"), Ok((512 << 20) * UNIT));
        assert_eq!(parse_nanos("2Ei"), Ok((2i128 << 60) * UNIT));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(parse_nanos("1e3"), Ok(1_000 * UNIT));
        assert_eq!(parse_nanos("1E3"), Ok(1_000 * UNIT));
    }

    #[test]
    fn test_sub_nano_rounds_up() {
        assert_eq!(parse_nanos("0.0000000001"), Ok(1));
        assert_eq!(parse_nanos("1.5n"), Ok(2));
        assert_eq!(parse_nanos("-1.5n"), Ok(-2));
    }

    #[test]
    fn test_invalid_quantities() {
        assert_eq!(parse_nanos(""), Err(ParseQuantityError::Empty));
        for input in ["abc", "10x", "1.2.3", "lots"] {
            match parse_nanos(input) {
                Err(ParseQuantityError::Invalid { input: got, .. }) => assert_eq!(got, input),
                other => panic!("{:?} parsed as {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_to_nanos_range() {
        assert_eq!(to_nanos(0.0), Some(0));
        assert_eq!(to_nanos(0.1), Some(100_000_000));
        assert_eq!(to_nanos(f64::INFINITY), None);
        assert_eq!(to_nanos(f64::NAN), None);
        assert_eq!(to_nanos(1e30), None);
        assert_eq!(to_nanos(-1e30), None);
    }
}
