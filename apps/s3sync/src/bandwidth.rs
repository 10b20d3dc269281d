//! Byte-rate parsing for `--ratelimit-bandwidth`.
//!
//! Grammar: `[ws] digits [ws] [K|M|G] [ws]`, unit case-insensitive, binary
//! multiples. Blank input means unlimited and yields `Some(0)`.

/// Parse a rate like `"10M"` into bytes per second. `None` on any deviation
/// from the grammar or on overflow.
pub fn parse_bandwidth(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0);
    }
    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (digits, rest) = s.split_at(digits_end);
    if digits.is_empty() {
        return None;
    }
    let multiplier: u64 = match rest.trim_start() {
        "" => 1,
        "k" | "K" => 1 << 10,
        "m" | "M" => 1 << 20,
        "g" | "G" => 1 << 30,
        _ => return None,
    };
    digits.parse::<u64>().ok()?.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_suffixed_rates() {
        assert_eq!(parse_bandwidth(""), Some(0));
        assert_eq!(parse_bandwidth("100"), Some(100));
        assert_eq!(parse_bandwidth("10K"), Some(10240));
        assert_eq!(parse_bandwidth("1M"), Some(1_048_576));
        assert_eq!(parse_bandwidth("2G"), Some(2_147_483_648));
        assert_eq!(parse_bandwidth("3g"), Some(3 * 1024 * 1024 * 1024));
        assert_eq!(parse_bandwidth("0"), Some(0));
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_eq!(parse_bandwidth("   "), Some(0));
        assert_eq!(parse_bandwidth(" 512 "), Some(512));
        assert_eq!(parse_bandwidth("10 k"), Some(10240));
        assert_eq!(parse_bandwidth("\t5M\n"), Some(5 * 1024 * 1024));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_bandwidth("10X"), None);
        assert_eq!(parse_bandwidth("K"), None);
        assert_eq!(parse_bandwidth("10KB"), None);
        assert_eq!(parse_bandwidth("1K0"), None);
        assert_eq!(parse_bandwidth("-5"), None);
        assert_eq!(parse_bandwidth("1.5M"), None);
        assert_eq!(parse_bandwidth("99999999999999999999G"), None);
    }
}
