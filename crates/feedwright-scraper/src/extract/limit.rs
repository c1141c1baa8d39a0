/// Item cap used when the caller supplies none or an unusable value.
pub const DEFAULT_LIMIT: usize = 30;

/// Parses a `limit` query value.
///
/// Leading whitespace and an optional sign are accepted, then the longest run
/// of ASCII digits; trailing junk is ignored (`"12abc"` is 12). Missing,
/// non-numeric, and negative values fall back to [`DEFAULT_LIMIT`].
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return DEFAULT_LIMIT;
    }

    let digits = &rest[..digits_len];
    if negative {
        // "-0" is still zero.
        return if digits.bytes().all(|b| b == b'0') {
            0
        } else {
            DEFAULT_LIMIT
        };
    }

    digits.parse::<usize>().unwrap_or(usize::MAX)
}
