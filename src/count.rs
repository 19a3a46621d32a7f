use std::fs::File;
use std::path::Path;

use memchr::memchr_iter;
use memmap::Mmap;

use crate::error::Result;

/// Count the lines of a file without parsing them.
/// A last line without terminator counts as well.
pub fn count_lines(path: &Path) -> Result<usize> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(0);
    }

    let mmap = unsafe { Mmap::map(&file)? };
    Ok(count_lines_in(&mmap))
}

pub fn count_lines_in(data: &[u8]) -> usize {
    let lines = memchr_iter(b'\n', data).count();
    match data.last() {
        Some(&b'\n') | None => lines,
        Some(_) => lines + 1,
    }
}

#[test]
fn test_count_lines_in() {
    assert_eq!(0, count_lines_in(b""));
    assert_eq!(1, count_lines_in(b"1.1 0"));
    assert_eq!(2, count_lines_in(b"1.1 0\r\n2.1 1\r\n"));
    assert_eq!(3, count_lines_in(b"1.1 0\n\n2.1 1"));
}

#[test]
fn test_count_lines_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.txt");

    std::fs::write(&path, b"").unwrap();
    assert_eq!(0, count_lines(&path).unwrap());

    std::fs::write(&path, b"1.1 0\n2.1 1\n").unwrap();
    assert_eq!(2, count_lines(&path).unwrap());
}
