use std::fmt::{Display, Formatter};

use crate::container::Container;
use crate::parse::ParsedRow;

/// Parsed values of one pass, `doubles[i]` and `ints[i]` come from the same line
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
}

impl ResultSet {
    /// Pre-size both sequences, `rows` is usually the line count of the input
    pub fn with_capacity(rows: usize) -> Self {
        ResultSet {
            doubles: Vec::with_capacity(rows),
            ints: Vec::with_capacity(rows),
        }
    }

    #[inline]
    pub fn push(&mut self, row: ParsedRow) {
        self.doubles.push(row.value);
        self.ints.push(row.other);
    }

    pub fn len(&self) -> usize {
        self.doubles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doubles.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = ParsedRow> + '_ {
        self.doubles
            .iter()
            .zip(self.ints.iter())
            .map(|(&value, &other)| ParsedRow { value, other })
    }
}

impl From<ResultSet> for Container {
    fn from(r: ResultSet) -> Self {
        Container {
            doubles: r.doubles,
            ints: r.ints,
        }
    }
}

/// Line counters of one pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Terminated lines seen
    pub lines: usize,
    /// Lines skipped as malformed
    pub errors: usize,
    /// An unterminated last line was left unparsed
    pub dropped_tail: bool,
}

impl Display for ParseStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "lines: {}, errors: {}", self.lines, self.errors)?;
        if self.dropped_tail {
            write!(f, ", unterminated tail dropped")?;
        }
        Ok(())
    }
}

#[test]
fn test_result_set_aligned() {
    let mut r = ResultSet::with_capacity(2);
    r.push(ParsedRow { value: 1.1, other: 0 });
    r.push(ParsedRow { value: 2.1, other: 1 });

    assert_eq!(2, r.len());
    assert_eq!(r.doubles.len(), r.ints.len());
    assert_eq!(vec![ParsedRow { value: 2.1, other: 1 }], r.rows().skip(1).collect::<Vec<_>>());

    let c: Container = r.into();
    assert_eq!(vec![1.1, 2.1], c.doubles);
    assert_eq!(vec![0, 1], c.ints);
}

#[test]
fn test_parse_stats_display() {
    let s = ParseStats { lines: 10, errors: 1, dropped_tail: true };
    assert_eq!("lines: 10, errors: 1, unterminated tail dropped", s.to_string());
}
