//! Banker's rounding for all money-affecting operations.
//!
//! Point balances round at 0 decimals, dollar balances at 2. The half-to-even
//! rule keeps repeated conversions from drifting in one direction the way
//! half-away-from-zero would.

/// Round `value` half-to-even at `decimals` fractional digits.
///
/// A value exactly halfway between two representable quantities rounds to the
/// neighbor whose last digit is even: `bankers_round(2.5, 0) == 2.0`,
/// `bankers_round(3.5, 0) == 4.0`.
pub fn bankers_round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let floor = scaled.floor();
    let rounded = if scaled - floor == 0.5 {
        // exactly halfway: pick the even neighbor
        if floor % 2.0 == 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    rounded / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_rounds_to_even_at_zero_decimals() {
        assert_eq!(bankers_round(2.5, 0), 2.0);
        assert_eq!(bankers_round(3.5, 0), 4.0);
        assert_eq!(bankers_round(0.5, 0), 0.0);
        assert_eq!(bankers_round(1.5, 0), 2.0);
    }

    #[test]
    fn halfway_rounds_to_even_at_two_decimals() {
        // 0.125 and 0.375 scale to exact binary halves
        assert_eq!(bankers_round(0.125, 2), 0.12);
        assert_eq!(bankers_round(0.375, 2), 0.38);
    }

    #[test]
    fn negative_halfway_rounds_to_even() {
        assert_eq!(bankers_round(-2.5, 0), -2.0);
        assert_eq!(bankers_round(-3.5, 0), -4.0);
    }

    #[test]
    fn non_halfway_rounds_to_nearest() {
        assert_eq!(bankers_round(2.4, 0), 2.0);
        assert_eq!(bankers_round(2.6, 0), 3.0);
        assert_eq!(bankers_round(1234.567, 2), 1234.57);
        assert_eq!(bankers_round(1234.561, 2), 1234.56);
    }

    #[test]
    fn rounding_is_idempotent() {
        for value in [2.5, 3.5, 0.125, 0.375, 1234.567, -7.215, 99.994] {
            for decimals in [0, 2] {
                let once = bankers_round(value, decimals);
                assert_eq!(bankers_round(once, decimals), once);
            }
        }
    }

    #[test]
    fn integers_pass_through() {
        assert_eq!(bankers_round(1000.0, 0), 1000.0);
        assert_eq!(bankers_round(42.0, 2), 42.0);
    }
}
