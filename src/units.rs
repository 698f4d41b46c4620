//! Monetary units. All values in this crate are integers in the smallest
//! unit; these helpers exist so amounts in code and tests read naturally.

/// Smallest units per whole coin.
pub const COIN: u64 = 100_000_000;

/// Smallest units per hundredth of a coin.
pub const CENT: u64 = COIN / 100;

/// Builds an amount from whole coins plus hundredths: `coins(1, 50)` is 1.50.
pub const fn coins(whole: u64, hundredths: u64) -> u64 {
    whole * COIN + hundredths * CENT
}

/// Renders a value as a decimal coin string, keeping at least two decimal
/// places: `450_000_000` becomes `"4.50"`.
pub fn format_value(value: u64) -> String {
    let whole = value / COIN;
    let frac = value % COIN;
    let mut digits = format!("{:08}", frac);
    while digits.len() > 2 && digits.ends_with('0') {
        digits.pop();
    }
    format!("{}.{}", whole, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coins_builds_smallest_units() {
        assert_eq!(coins(1, 0), COIN);
        assert_eq!(coins(0, 50), COIN / 2);
        assert_eq!(coins(5, 50), 550_000_000);
    }

    #[test]
    fn format_keeps_two_decimals() {
        assert_eq!(format_value(coins(4, 50)), "4.50");
        assert_eq!(format_value(coins(0, 90)), "0.90");
        assert_eq!(format_value(coins(1, 0)), "1.00");
        assert_eq!(format_value(123_456_789), "1.23456789");
    }
}
