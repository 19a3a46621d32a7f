pub mod chunked;
pub mod line_by_line;
pub mod split;

pub use chunked::{parse_chunked, parse_chunked_file};
pub use line_by_line::{parse_line_by_line, parse_line_by_line_file};
pub use split::{parse_split, parse_split_file};

/// Separator between whole and fractional digits, independent of the locale
pub const DECIMAL_SEPARATOR: u8 = b'.';
/// Separator between the double and the integer field
pub const FIELD_SEPARATOR: u8 = b' ';

/// One successfully parsed line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedRow {
    pub value: f64,
    pub other: i32,
}

/// Accumulate leading ASCII digits, return the value and the digit count.
/// Overflow wraps silently.
#[inline]
fn scan_digits(bytes: &[u8]) -> (i64, usize) {
    let mut acc: i64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let d = bytes[i].wrapping_sub(b'0');
        if d > 9 {
            break;
        }
        acc = acc.wrapping_mul(10).wrapping_add(d as i64);
        i += 1;
    }
    (acc, i)
}

/// Parse `<digits>.<digits>` without exponent or sign.
///
/// Return the value and the consumed byte count, `None` when either side of
/// the separator has no digit. The value is computed as `whole + fraction / 10^n`.
#[inline]
pub fn parse_f64(bytes: &[u8]) -> Option<(f64, usize)> {
    let (whole, n) = scan_digits(bytes);
    if n == 0 || bytes.get(n) != Some(&DECIMAL_SEPARATOR) {
        return None;
    }

    let fraction = &bytes[n + 1..];
    let mut b: i64 = 0;
    let mut div: i64 = 1;
    let mut i = 0;
    while i < fraction.len() {
        let d = fraction[i].wrapping_sub(b'0');
        if d > 9 {
            break;
        }
        b = b.wrapping_mul(10).wrapping_add(d as i64);
        div = div.wrapping_mul(10);
        i += 1;
    }
    if i == 0 {
        return None;
    }

    Some((whole as f64 + b as f64 / div as f64, n + 1 + i))
}

/// Parse leading digits, without sign and thousand separators.
/// The 64 bit accumulator is truncated to `i32`.
#[inline]
pub fn parse_i32(bytes: &[u8]) -> Option<(i32, usize)> {
    match scan_digits(bytes) {
        (_, 0) => None,
        (v, n) => Some((v as i32, n)),
    }
}

/// Parse a line of the form `<a>.<b> <c>`, terminator excluded
#[inline]
pub fn parse_line(line: &[u8]) -> Option<ParsedRow> {
    let (value, consumed) = parse_f64(line)?;

    // field separator and at least one more byte
    if line.len() - consumed < 2 || line[consumed] != FIELD_SEPARATOR {
        return None;
    }

    let (other, _) = parse_i32(&line[consumed + 1..])?;
    Some(ParsedRow { value, other })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_samples() {
        assert_eq!(Some(ParsedRow { value: 1.1, other: 0 }), parse_line(b"1.1 0"));
        assert_eq!(Some(ParsedRow { value: 11.25, other: 100 }), parse_line(b"11.25 100"));
        assert_eq!(
            Some(ParsedRow { value: 10000000.1, other: 9999999 }),
            parse_line(b"10000000.1 9999999")
        );
    }

    #[test]
    fn test_parse_line_formula() {
        for (a, b, c) in [(0u64, "5", 1u32), (7, "05", 12), (123, "456789", 42), (1, "0000000000000005", 3)] {
            let line = format!("{a}.{b} {c}");
            let expected = a as f64 + b.parse::<i64>().unwrap() as f64 / 10i64.pow(b.len() as u32) as f64;
            let row = parse_line(line.as_bytes()).unwrap();
            assert_eq!(expected.to_bits(), row.value.to_bits(), "{line}");
            assert_eq!(c as i32, row.other);
        }
    }

    #[test]
    fn test_parse_line_formula_random() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a: u32 = rng.gen();
            let digits = rng.gen_range(1..=15usize);
            let b: String = (0..digits).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
            let c: i32 = rng.gen_range(0..=i32::MAX);

            let line = format!("{a}.{b} {c}");
            let expected = a as f64 + b.parse::<i64>().unwrap() as f64 / 10i64.pow(digits as u32) as f64;
            let row = parse_line(line.as_bytes()).unwrap();
            assert_eq!(expected.to_bits(), row.value.to_bits(), "{line}");
            assert_eq!(c, row.other, "{line}");
        }
    }

    #[test]
    fn test_parse_line_trailing_bytes() {
        assert_eq!(Some(ParsedRow { value: 2.5, other: 3 }), parse_line(b"2.5 3\r"));
        assert_eq!(Some(ParsedRow { value: 2.5, other: 3 }), parse_line(b"2.5 3x9"));
    }

    #[test]
    fn test_parse_line_bad() {
        assert_eq!(None, parse_line(b""));
        assert_eq!(None, parse_line(b"abc"));
        assert_eq!(None, parse_line(b"-1.5 3"));
        assert_eq!(None, parse_line(b".5 3"));
        assert_eq!(None, parse_line(b"1. 3"));
        assert_eq!(None, parse_line(b"1,5 3"));
        assert_eq!(None, parse_line(b"1.5"));
        assert_eq!(None, parse_line(b"1.5 "));
        assert_eq!(None, parse_line(b"1.5  3"));
        assert_eq!(None, parse_line(b"1.5;3"));
        assert_eq!(None, parse_line(b"1.5 x"));
        assert_eq!(None, parse_line(b"1e5.0 3"));
    }

    #[test]
    fn test_parse_f64_consumed() {
        assert_eq!(Some((3.25, 4)), parse_f64(b"3.25 7"));
        assert_eq!(Some((3.25, 4)), parse_f64(b"3.25"));
        assert_eq!(None, parse_f64(b"325"));
    }

    #[test]
    fn test_parse_i32() {
        assert_eq!(Some((100, 3)), parse_i32(b"100"));
        assert_eq!(Some((7, 1)), parse_i32(b"7 "));
        assert_eq!(None, parse_i32(b" 7"));
        assert_eq!(Some((i32::MAX, 10)), parse_i32(b"2147483647"));
    }
}
