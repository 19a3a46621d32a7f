use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use crate::error::Result;
use crate::parse::{ParsedRow, FIELD_SEPARATOR};
use crate::result::{ParseStats, ResultSet};

pub fn parse_split_file(path: &Path, expected_rows: usize) -> Result<(ResultSet, ParseStats)> {
    let file = File::open(path)?;
    parse_split(BufReader::new(file), expected_rows)
}

/// The straightforward way: split every line on [`FIELD_SEPARATOR`] and
/// parse both parts with the standard library.
/// Lines without exactly two parseable fields are skipped.
pub fn parse_split<R: BufRead>(reader: R, expected_rows: usize) -> Result<(ResultSet, ParseStats)> {
    let mut result = ResultSet::with_capacity(expected_rows);
    let mut stats = ParseStats::default();

    for line in reader.lines() {
        let line = line?;
        stats.lines += 1;

        let text = if stats.lines == 1 { line.trim_start_matches('\u{feff}') } else { line.as_str() };
        let parts: Vec<&str> = text.split(FIELD_SEPARATOR as char).collect();
        if parts.len() != 2 {
            stats.errors += 1;
            continue;
        }

        match (parts[0].parse::<f64>(), parts[1].parse::<i32>()) {
            (Ok(value), Ok(other)) => result.push(ParsedRow { value, other }),
            _ => stats.errors += 1,
        }
    }

    trace!(%stats, rows = result.len(), "split parse done");
    Ok((result, stats))
}

#[test]
fn test_parse_split() {
    use std::io::Cursor;

    let input = "\u{feff}1.1 0\n11.25 100\r\n1.5 2 3\nabc\n2.5 x\n-3.5 4";
    let (r, s) = parse_split(Cursor::new(input), 0).unwrap();

    assert_eq!(vec![1.1, 11.25, -3.5], r.doubles);
    assert_eq!(vec![0, 100, 4], r.ints);
    assert_eq!(ParseStats { lines: 6, errors: 3, dropped_tail: false }, s);
}
