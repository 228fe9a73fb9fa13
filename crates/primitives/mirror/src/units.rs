use bigdecimal::BigDecimal;

use crate::network::ExchangeRate;

pub const TINYBARS_PER_HBAR: i64 = 100_000_000;
const HBAR_DECIMALS: i64 = 8;

/// Exact conversion of a tinybar amount to hbar.
pub fn tinybars_to_hbar(tinybars: i64) -> BigDecimal {
    BigDecimal::new(tinybars.into(), HBAR_DECIMALS)
}

/// Converts hbar to tinybars, truncating anything below one tinybar.
pub fn hbar_to_tinybars(hbar: &BigDecimal) -> Option<i64> {
    use bigdecimal::ToPrimitive;
    (hbar * BigDecimal::from(TINYBARS_PER_HBAR)).with_scale(0).to_i64()
}

/// USD price of one hbar for a given exchange rate.
pub fn hbar_price_usd(rate: &ExchangeRate) -> Option<f64> {
    if rate.hbar_equivalent == 0 {
        return None;
    }
    Some(rate.cent_equivalent as f64 / rate.hbar_equivalent as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(100_000_000, "1")]
    #[case(150_000_000, "1.5")]
    #[case(1, "0.00000001")]
    #[case(-250_000_000, "-2.5")]
    fn test_tinybars_to_hbar(#[case] tinybars: i64, #[case] expected: &str) {
        assert_eq!(tinybars_to_hbar(tinybars), BigDecimal::from_str(expected).unwrap());
    }

    #[test]
    fn test_hbar_to_tinybars() {
        assert_eq!(hbar_to_tinybars(&BigDecimal::from_str("1.23456789").unwrap()), Some(123_456_789));
        assert_eq!(hbar_to_tinybars(&BigDecimal::from_str("0.000000001").unwrap()), Some(0));
    }

    #[test]
    fn test_hbar_price() {
        let rate = ExchangeRate { cent_equivalent: 120, hbar_equivalent: 10, expiration_time: 0 };
        assert_eq!(hbar_price_usd(&rate), Some(0.12));
        assert_eq!(hbar_price_usd(&ExchangeRate { hbar_equivalent: 0, ..rate }), None);
    }
}
