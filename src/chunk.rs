use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};

/// UTF-8 byte order mark
pub const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reusable fixed capacity byte buffer.
///
/// The first `carry` bytes hold the unterminated tail of the previous chunk,
/// `len` bytes in total are valid after a fill.
#[derive(Debug)]
pub struct Chunk {
    buf: Box<[u8]>,
    carry: usize,
    len: usize,
    start: usize,
}

impl Chunk {
    pub fn with_capacity(capacity: usize) -> Self {
        Chunk {
            buf: vec![0u8; capacity].into_boxed_slice(),
            carry: 0,
            len: 0,
            start: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes carried over from the previous chunk
    pub fn carry(&self) -> usize {
        self.carry
    }

    /// Valid bytes of the current fill, the byte order mark excluded
    pub fn data(&self) -> &[u8] {
        &self.buf[self.start..self.len]
    }

    /// Move the bytes of [`Chunk::data`] after `consumed` to the front of the buffer,
    /// they become the carry-over of the next fill.
    pub fn retain_tail(&mut self, consumed: usize) {
        let from = self.start + consumed;
        debug_assert!(from <= self.len);
        self.buf.copy_within(from..self.len, 0);
        self.carry = self.len - from;
        self.len = self.carry;
        self.start = 0;
    }
}

/// Fills a [`Chunk`] from the underlying reader, one `read` call per fill.
pub struct ChunkedByteReader<R> {
    inner: R,
    first: bool,
}

impl<R: Read> ChunkedByteReader<R> {
    pub fn new(inner: R) -> Self {
        ChunkedByteReader { inner, first: true }
    }

    /// Read at most `capacity - carry` new bytes behind the carry-over of `chunk`.
    ///
    /// Return the number of new bytes, 0 at end of input. A carry-over that
    /// fills the whole chunk is [`Error::LineTooLong`] unless the input ends there.
    /// A leading byte order mark of the first chunk is skipped by [`Chunk::data`].
    pub fn fill(&mut self, chunk: &mut Chunk) -> Result<usize> {
        let capacity = chunk.capacity();
        if chunk.carry >= capacity {
            // a full carry-over is only an error if the line goes on
            let mut probe = [0u8; 1];
            return match self.read(&mut probe)? {
                0 => Ok(0),
                _ => Err(Error::LineTooLong { capacity }),
            };
        }

        let read = self.read(&mut chunk.buf[chunk.carry..])?;

        chunk.len = chunk.carry + read;
        chunk.start = 0;

        if self.first && read > 0 {
            self.first = false;
            if chunk.buf[..chunk.len].starts_with(BOM) {
                chunk.start = BOM.len();
            }
        }

        Ok(read)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_fill_keeps_carry_over() {
        let mut reader = ChunkedByteReader::new(Cursor::new(b"12.5 7\n3.2".to_vec()));
        let mut chunk = Chunk::with_capacity(8);

        assert_eq!(8, reader.fill(&mut chunk).unwrap());
        assert_eq!(b"12.5 7\n3", chunk.data());

        chunk.retain_tail(7);
        assert_eq!(1, chunk.carry());

        assert_eq!(2, reader.fill(&mut chunk).unwrap());
        assert_eq!(b"3.2", chunk.data());

        chunk.retain_tail(0);
        assert_eq!(0, reader.fill(&mut chunk).unwrap());
        assert_eq!(3, chunk.carry());
    }

    #[test]
    fn test_bom_skipped_on_first_chunk_only() {
        let mut input = BOM.to_vec();
        input.extend_from_slice(b"1.1 0\n");
        input.extend_from_slice(BOM);
        let mut reader = ChunkedByteReader::new(Cursor::new(input));
        let mut chunk = Chunk::with_capacity(9);

        reader.fill(&mut chunk).unwrap();
        assert_eq!(b"1.1 0\n", chunk.data());
        chunk.retain_tail(6);

        reader.fill(&mut chunk).unwrap();
        assert_eq!(BOM, chunk.data());
    }

    #[test]
    fn test_line_too_long() {
        let mut reader = ChunkedByteReader::new(Cursor::new(b"123456789".to_vec()));
        let mut chunk = Chunk::with_capacity(4);

        reader.fill(&mut chunk).unwrap();
        chunk.retain_tail(0);

        match reader.fill(&mut chunk) {
            Err(Error::LineTooLong { capacity }) => assert_eq!(4, capacity),
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn test_full_carry_over_at_end_of_input() {
        let mut reader = ChunkedByteReader::new(Cursor::new(b"2.1 1".to_vec()));
        let mut chunk = Chunk::with_capacity(5);

        assert_eq!(5, reader.fill(&mut chunk).unwrap());
        chunk.retain_tail(0);

        assert_eq!(0, reader.fill(&mut chunk).unwrap());
        assert_eq!(5, chunk.carry());
    }
}
