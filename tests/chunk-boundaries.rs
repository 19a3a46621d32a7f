use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use linereader::LineReader;
use rand::Rng;
use tempfile::TempDir;

use iobound::chunk::BOM;
use iobound::config::CHUNK_SIZE;
use iobound::count::count_lines;
use iobound::lines::NEW_LINE;
use iobound::parse::{parse_chunked_file, parse_line, ParsedRow};
use iobound::result::ResultSet;
use iobound::testdata::write_text;
use iobound::Error;

const ROWS: usize = 5_000;

fn generated(rows: usize) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NumericData.txt");
    write_text(&path, rows).unwrap();
    (dir, path)
}

/// Rows of every terminated line, split by an independent line reader
fn reference_rows(path: &Path) -> Vec<ParsedRow> {
    let mut reader = LineReader::new(File::open(path).unwrap());
    let mut rows = Vec::new();
    let mut first = true;

    while let Some(line) = reader.next_line() {
        let line = line.unwrap();
        let Some(line) = line.strip_suffix(NEW_LINE) else {
            continue;
        };
        let line = if first { line.strip_prefix(BOM).unwrap_or(line) } else { line };
        first = false;
        if let Some(row) = parse_line(line) {
            rows.push(row);
        }
    }

    rows
}

fn parse(path: &Path, capacity: usize) -> ResultSet {
    let (result, stats) = parse_chunked_file(path, capacity, ROWS).unwrap();
    assert_eq!(result.doubles.len(), result.ints.len());
    assert_eq!(stats.lines - stats.errors, result.len());
    result
}

#[test]
fn test_chunk_sizes_yield_same_rows() {
    let (_dir, path) = generated(ROWS);
    let file_len = fs::metadata(&path).unwrap().len() as usize;

    let expected = reference_rows(&path);
    assert_eq!(ROWS, expected.len());

    for capacity in [64, 4096, CHUNK_SIZE, file_len] {
        let result = parse(&path, capacity);
        assert_eq!(expected, result.rows().collect::<Vec<_>>(), "capacity {capacity}");
    }
}

#[test]
fn test_random_chunk_sizes() {
    let (_dir, path) = generated(ROWS);
    let expected = parse(&path, CHUNK_SIZE);

    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let capacity = rng.gen_range(32..2048);
        assert_eq!(expected, parse(&path, capacity), "capacity {capacity}");
    }
}

#[test]
fn test_parse_is_deterministic() {
    let (_dir, path) = generated(ROWS);
    assert_eq!(parse(&path, 4096), parse(&path, 4096));
}

#[test]
fn test_last_line_without_terminator_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unterminated.txt");
    let mut file = File::create(&path).unwrap();
    file.write_all(b"1.1 0").unwrap();
    file.write_all(NEW_LINE).unwrap();
    file.write_all(b"2.1 1").unwrap();
    drop(file);

    for capacity in [16, 64] {
        let (result, stats) = parse_chunked_file(&path, capacity, 2).unwrap();
        assert_eq!(vec![ParsedRow { value: 1.1, other: 0 }], result.rows().collect::<Vec<_>>());
        assert_eq!(1, stats.lines);
        assert!(stats.dropped_tail);
    }

    // the line counter still sees both lines
    assert_eq!(2, count_lines(&path).unwrap());
}

#[test]
fn test_unterminated_line_as_long_as_chunk_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.txt");
    fs::write(&path, b"2.1 1").unwrap();
    let file_len = fs::metadata(&path).unwrap().len() as usize;

    for capacity in [file_len, 64, 4096, CHUNK_SIZE] {
        let (result, stats) = parse_chunked_file(&path, capacity, 1).unwrap();
        assert!(result.is_empty(), "capacity {capacity}");
        assert_eq!(0, stats.lines);
        assert!(stats.dropped_tail);
    }
}

#[test]
fn test_bom_and_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.txt");
    let mut data = BOM.to_vec();
    data.extend_from_slice(b"11.25 100");
    data.extend_from_slice(NEW_LINE);
    fs::write(&path, data).unwrap();

    let (result, stats) = parse_chunked_file(&path, 64, 1).unwrap();
    assert_eq!(vec![ParsedRow { value: 11.25, other: 100 }], result.rows().collect::<Vec<_>>());
    assert_eq!(0, stats.errors);
}

#[test]
fn test_line_longer_than_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.txt");
    let mut data = b"1.1 0".to_vec();
    data.extend_from_slice(NEW_LINE);
    data.extend_from_slice(format!("1.{} 1", "1".repeat(40)).as_bytes());
    data.extend_from_slice(NEW_LINE);
    fs::write(&path, data).unwrap();

    match parse_chunked_file(&path, 16, 2) {
        Err(Error::LineTooLong { capacity }) => assert_eq!(16, capacity),
        r => panic!("unexpected {r:?}"),
    }
}
