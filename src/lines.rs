use memchr::{memchr, memmem};

/// Platform line terminator
#[cfg(windows)]
pub const NEW_LINE: &[u8] = b"\r\n";
#[cfg(not(windows))]
pub const NEW_LINE: &[u8] = b"\n";

/// Zero-copy iterator over the terminated lines of a byte span.
///
/// Yields every slice up to, not including, the next terminator. The bytes
/// after the last terminator are never yielded, see [`Lines::consumed`].
pub struct Lines<'a> {
    buf: &'a [u8],
    pos: usize,
    terminator: &'a [u8],
}

impl<'a> Lines<'a> {
    pub fn with_terminator(buf: &'a [u8], terminator: &'a [u8]) -> Self {
        assert!(!terminator.is_empty(), "empty line terminator");
        Lines { buf, pos: 0, terminator }
    }

    /// Offset just past the last terminator found so far.
    /// Once the iterator is exhausted, `buf[consumed..]` is the unterminated tail.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Unterminated bytes, complete once the iterator returned `None`
    pub fn remainder(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    fn find(&self, rest: &[u8]) -> Option<usize> {
        match self.terminator {
            [b] => memchr(*b, rest),
            t => memmem::find(rest, t),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.buf[self.pos..];
        let end = Lines::find(self, rest)?;
        self.pos += end + self.terminator.len();
        Some(&rest[..end])
    }
}

#[test]
fn test_lines_keep_tail() {
    let mut lines = Lines::with_terminator(b"1.1 0\n2.1 1\n3.1", b"\n");
    assert_eq!(Some(&b"1.1 0"[..]), lines.next());
    assert_eq!(Some(&b"2.1 1"[..]), lines.next());
    assert_eq!(None, lines.next());
    assert_eq!(12, lines.consumed());
    assert_eq!(b"3.1", lines.remainder());
}

#[test]
fn test_lines_empty_line() {
    let lines: Vec<&[u8]> = Lines::with_terminator(b"\n1.1 0\n\n", b"\n").collect();
    assert_eq!(vec![&b""[..], &b"1.1 0"[..], &b""[..]], lines);
}

#[test]
fn test_lines_crlf() {
    let mut lines = Lines::with_terminator(b"1.1 0\r\n2.1 1\r", b"\r\n");
    assert_eq!(Some(&b"1.1 0"[..]), lines.next());
    assert_eq!(None, lines.next());
    assert_eq!(b"2.1 1\r", lines.remainder());
}

#[test]
fn test_lines_no_terminator() {
    let mut lines = Lines::with_terminator(b"1.1 0", b"\n");
    assert_eq!(None, lines.next());
    assert_eq!(0, lines.consumed());
}
