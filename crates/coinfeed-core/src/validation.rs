//! Opt-in consistency checks for normalized market data.

use crate::Candle;

/// True when `high` is the largest and `low` the smallest of the candle's four
/// prices. Comparisons are exact.
pub fn verify_candle(candle: &Candle) -> bool {
    let prices = [candle.open, candle.high, candle.low, candle.close];
    let highest = prices.iter().max().copied();
    let lowest = prices.iter().min().copied();

    highest == Some(candle.high) && lowest == Some(candle.low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn candle(open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Candle {
        let ts = UtcDateTime::from_unix_seconds(1_700_000_000).expect("timestamp");
        Candle::new(ts, open, high, low, close, dec!(1)).expect("structurally valid")
    }

    #[test]
    fn accepts_consistent_candle() {
        assert!(verify_candle(&candle(dec!(95), dec!(110), dec!(90), dec!(105))));
    }

    #[test]
    fn accepts_flat_candle() {
        assert!(verify_candle(&candle(dec!(1), dec!(1), dec!(1), dec!(1))));
    }

    #[test]
    fn rejects_high_below_open() {
        assert!(!verify_candle(&candle(dec!(101), dec!(100), dec!(90), dec!(95))));
    }

    #[test]
    fn rejects_high_below_close() {
        assert!(!verify_candle(&candle(dec!(95), dec!(100), dec!(90), dec!(100.01))));
    }

    #[test]
    fn rejects_low_above_close() {
        assert!(!verify_candle(&candle(dec!(95), dec!(100), dec!(92), dec!(91.5))));
    }

    #[test]
    fn rejects_swapped_high_and_low() {
        assert!(!verify_candle(&candle(dec!(95), dec!(90), dec!(100), dec!(95))));
    }

    #[test]
    fn trailing_zeros_do_not_matter() {
        assert!(verify_candle(&candle(
            dec!(95.0),
            dec!(110.00),
            dec!(90),
            dec!(105.000)
        )));
    }
}
