/// Parse the leading integer of a free-text field, falling back to 0.
///
/// Leading whitespace and a single sign are accepted, then the longest run of
/// ASCII digits is read and anything after it is ignored, so `"3abc"` is 3
/// and `"2.7"` is 2. No digits at all gives 0. Out-of-range input saturates.
pub fn int_or_zero(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}

/// Same rule as [`int_or_zero`], clamped into a non-negative counter.
pub fn counter_or_zero(raw: &str) -> u32 {
    clamp_counter(int_or_zero(raw))
}

pub(crate) fn clamp_counter(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_garbage_are_zero() {
        assert_eq!(int_or_zero(""), 0);
        assert_eq!(int_or_zero("   "), 0);
        assert_eq!(int_or_zero("abc"), 0);
        assert_eq!(int_or_zero("-"), 0);
    }

    #[test]
    fn reads_leading_digits_only() {
        assert_eq!(int_or_zero("3abc"), 3);
        assert_eq!(int_or_zero("2.7"), 2);
        assert_eq!(int_or_zero("  12 "), 12);
        assert_eq!(int_or_zero("+4"), 4);
        assert_eq!(int_or_zero("-5"), -5);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(int_or_zero("99999999999999999999999"), i64::MAX);
        assert_eq!(int_or_zero("-99999999999999999999999"), i64::MIN);
        assert_eq!(counter_or_zero("99999999999999"), u32::MAX);
    }

    #[test]
    fn counters_never_go_negative() {
        assert_eq!(counter_or_zero("-3"), 0);
        assert_eq!(counter_or_zero("7"), 7);
    }
}
