use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use tracing::trace;

use crate::error::Result;
use crate::parse::{ParsedRow, DECIMAL_SEPARATOR};
use crate::result::{ParseStats, ResultSet};

const BOM_CHAR: char = '\u{feff}';

pub fn parse_line_by_line_file(path: &Path, expected_rows: usize) -> Result<(ResultSet, ParseStats)> {
    let file = File::open(path)?;
    parse_line_by_line(BufReader::new(file), expected_rows)
}

/// Decode every line to text and scan its characters.
///
/// Every valid UTF-8 line yields a row, missing fields default to zero.
/// Unlike the chunked parser, an unterminated last line is parsed too.
pub fn parse_line_by_line<R: BufRead>(mut reader: R, expected_rows: usize) -> Result<(ResultSet, ParseStats)> {
    let mut result = ResultSet::with_capacity(expected_rows);
    let mut stats = ParseStats::default();
    let mut buf = Vec::with_capacity(64);

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let Ok(text) = simdutf8::basic::from_utf8(&buf) else {
            stats.errors += 1;
            continue;
        };
        let text = text.strip_suffix('\n').unwrap_or(text);
        let text = text.strip_suffix('\r').unwrap_or(text);
        let text = if stats.lines == 1 { text.strip_prefix(BOM_CHAR).unwrap_or(text) } else { text };

        result.push(scan_line(text));
    }

    trace!(%stats, rows = result.len(), "line by line parse done");
    Ok((result, stats))
}

fn scan_digits(chars: &mut Peekable<Chars>) -> (i64, i64) {
    let mut acc: i64 = 0;
    let mut scale: i64 = 1;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        acc = acc.wrapping_mul(10).wrapping_add(d as i64);
        scale = scale.wrapping_mul(10);
        chars.next();
    }
    (acc, scale)
}

/// Scan `<a>.<b> <c>` leniently: whitespace of any length separates the
/// fields, a value without [`DECIMAL_SEPARATOR`] is `0.0`
pub fn scan_line(text: &str) -> ParsedRow {
    let mut chars = text.chars().peekable();

    let (a, _) = scan_digits(&mut chars);

    let mut value = 0.0;
    if chars.next_if_eq(&(DECIMAL_SEPARATOR as char)).is_some() {
        let (b, div) = scan_digits(&mut chars);
        value = a as f64 + b as f64 / div as f64;
    }

    while chars.next_if(|c| c.is_whitespace()).is_some() {}

    let (other, _) = scan_digits(&mut chars);

    ParsedRow { value, other: other as i32 }
}

#[test]
fn test_scan_line() {
    assert_eq!(ParsedRow { value: 1.1, other: 0 }, scan_line("1.1 0"));
    assert_eq!(ParsedRow { value: 11.25, other: 100 }, scan_line("11.25\t 100"));
    assert_eq!(ParsedRow { value: 0.0, other: 0 }, scan_line("abc"));
    assert_eq!(ParsedRow { value: 0.0, other: 3 }, scan_line("5 3"));
    assert_eq!(ParsedRow { value: 5.0, other: 3 }, scan_line("5. 3"));
}

#[test]
fn test_parse_line_by_line() {
    use std::io::Cursor;

    let input = "\u{feff}1.1 0\r\nabc\n2.1 1".as_bytes();
    let (r, s) = parse_line_by_line(Cursor::new(input), 3).unwrap();

    assert_eq!(vec![1.1, 0.0, 2.1], r.doubles);
    assert_eq!(vec![0, 0, 1], r.ints);
    assert_eq!(ParseStats { lines: 3, errors: 0, dropped_tail: false }, s);
}

#[test]
fn test_parse_line_by_line_invalid_utf8() {
    use std::io::Cursor;

    let (r, s) = parse_line_by_line(Cursor::new(b"\xff\xfe 1\n2.5 2\n".to_vec()), 0).unwrap();
    assert_eq!(vec![2.5], r.doubles);
    assert_eq!(1, s.errors);
}
