pub mod bench;
pub mod chunk;
pub mod config;
pub mod container;
pub mod count;
pub mod error;
pub mod lines;
pub mod parse;
pub mod probe;
pub mod result;
pub mod testdata;

pub use error::{Error, Result};

#[cfg(debug_assertions)]
pub const FILE_PATH: &str = "NumericData-small.txt"; // Debug configuration
#[cfg(not(debug_assertions))]
pub const FILE_PATH: &str = "NumericData.txt"; // Release configuration

#[cfg(debug_assertions)]
pub const DEFAULT_ROWS: usize = 100_000;
#[cfg(not(debug_assertions))]
pub const DEFAULT_ROWS: usize = 10 * 1000 * 1000;

pub mod test {

    pub const TEST_STR_1: &str = "\
1.1 0
";

    /// Ten generated rows followed by lines every parser has to cope with
    pub const TEST_STR_MIXED: &str = "\
1.1 0
2.1 1
3.1 2
4.1 3
5.1 4
6.1 5
7.1 6
8.1 7
9.1 8
10.1 9
abc
11.25 100
-1.5 3

1.5
";

}
