use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Issue one read request of up to `max_bytes` into a fresh buffer.
///
/// Nothing is parsed, the returned byte count only measures the disk.
/// A short read is not retried.
pub fn read_all_at_once(file: &mut File, max_bytes: usize) -> Result<usize> {
    let mut buf = vec![0u8; max_bytes];
    let read = file.read(&mut buf)?;
    debug!(read, max_bytes, "raw read");
    Ok(read)
}

pub fn read_file_at_once(path: &Path, max_bytes: usize) -> Result<usize> {
    let mut file = File::open(path)?;
    read_all_at_once(&mut file, max_bytes)
}

#[test]
fn test_read_all_at_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("probe.txt");
    std::fs::write(&path, b"1.1 0\n2.1 1\n").unwrap();

    assert_eq!(12, read_file_at_once(&path, 1024).unwrap());
    assert_eq!(5, read_file_at_once(&path, 5).unwrap());
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_file_at_once(&dir.path().join("missing.txt"), 16),
        Err(crate::error::Error::Io(_))
    ));
}
