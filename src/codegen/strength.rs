/// Returns `k` such that `value == 2^k`, or 0 when the shift rewrite does not
/// apply. 0 is also returned for `value == 1` (where `k` really is 0), for 0
/// and for every negative value, so callers must read 0 as "not applicable".
pub fn exponent_if_power_of_two(value: i64) -> u32 {
    if value <= 0 || value & (value - 1) != 0 {
        return 0;
    }
    value.trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers_of_two() {
        assert_eq!(exponent_if_power_of_two(2), 1);
        assert_eq!(exponent_if_power_of_two(8), 3);
        assert_eq!(exponent_if_power_of_two(1024), 10);
        assert_eq!(exponent_if_power_of_two(1 << 62), 62);
    }

    #[test]
    fn sentinel_cases() {
        assert_eq!(exponent_if_power_of_two(1), 0);
        assert_eq!(exponent_if_power_of_two(0), 0);
        assert_eq!(exponent_if_power_of_two(6), 0);
        assert_eq!(exponent_if_power_of_two(1023), 0);
    }

    #[test]
    fn negatives_never_shift() {
        assert_eq!(exponent_if_power_of_two(-1), 0);
        assert_eq!(exponent_if_power_of_two(-8), 0);
        assert_eq!(exponent_if_power_of_two(i64::MIN), 0);
    }
}
