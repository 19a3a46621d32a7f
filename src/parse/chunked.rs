use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{trace, warn};

use crate::chunk::{Chunk, ChunkedByteReader};
use crate::error::Result;
use crate::lines::{Lines, NEW_LINE};
use crate::parse::parse_line;
use crate::result::{ParseStats, ResultSet};

/// Parse the file at `path` in chunks of `capacity` bytes
pub fn parse_chunked_file(path: &Path, capacity: usize, expected_rows: usize) -> Result<(ResultSet, ParseStats)> {
    let file = File::open(path)?;
    parse_chunked(file, capacity, expected_rows)
}

/// Parse `reader` in chunks of `capacity` bytes, lines split on the platform [`NEW_LINE`]
pub fn parse_chunked<R: Read>(reader: R, capacity: usize, expected_rows: usize) -> Result<(ResultSet, ParseStats)> {
    parse_chunked_with_terminator(reader, capacity, expected_rows, NEW_LINE)
}

/// Parse every terminated line of `reader` without decoding it to text.
///
/// Malformed lines are counted in [`ParseStats::errors`] and skipped.
/// An unterminated last line is never parsed, it only sets [`ParseStats::dropped_tail`].
pub fn parse_chunked_with_terminator<R: Read>(
    reader: R,
    capacity: usize,
    expected_rows: usize,
    terminator: &[u8],
) -> Result<(ResultSet, ParseStats)> {
    let mut reader = ChunkedByteReader::new(reader);
    let mut chunk = Chunk::with_capacity(capacity);
    let mut result = ResultSet::with_capacity(expected_rows);
    let mut stats = ParseStats::default();

    while reader.fill(&mut chunk)? != 0 {
        let mut lines = Lines::with_terminator(chunk.data(), terminator);
        for line in lines.by_ref() {
            stats.lines += 1;
            match parse_line(line) {
                Some(row) => result.push(row),
                None => stats.errors += 1,
            }
        }
        let consumed = lines.consumed();
        chunk.retain_tail(consumed);
    }

    if chunk.carry() > 0 {
        stats.dropped_tail = true;
        warn!(bytes = chunk.carry(), "unterminated last line dropped");
    }
    trace!(%stats, rows = result.len(), "chunked parse done");

    Ok((result, stats))
}
