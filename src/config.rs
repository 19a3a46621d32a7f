use std::path::PathBuf;

use envconfig::Envconfig;

use crate::{DEFAULT_ROWS, FILE_PATH};

/// Default chunk capacity of the chunked parser, 10 pages
pub const CHUNK_SIZE: usize = 10 * 4096;

/// Default request size of the raw read probe
pub const PROBE_BYTES: usize = 200 * 1000 * 1000;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "IOBOUND_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[envconfig(from = "IOBOUND_ROWS")]
    pub rows: Option<usize>,

    #[envconfig(from = "IOBOUND_CHUNK_SIZE", default = "40960")]
    pub chunk_size: usize,

    #[envconfig(from = "IOBOUND_PROBE_BYTES", default = "200000000")]
    pub probe_bytes: usize,
}

impl Config {
    /// Text data file, falls back to [`FILE_PATH`] of the current build profile.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| PathBuf::from(FILE_PATH))
    }

    /// Rows written when the test data has to be generated.
    pub fn rows(&self) -> usize {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: None,
            rows: None,
            chunk_size: CHUNK_SIZE,
            probe_bytes: PROBE_BYTES,
        }
    }
}

#[test]
fn test_config_from_hashmap() {
    use std::collections::HashMap;

    let env = HashMap::from([
        ("IOBOUND_DATA_FILE".to_owned(), "other.txt".to_owned()),
        ("IOBOUND_CHUNK_SIZE".to_owned(), "64".to_owned()),
    ]);
    let config = Config::init_from_hashmap(&env).unwrap();

    assert_eq!(PathBuf::from("other.txt"), config.data_file());
    assert_eq!(64, config.chunk_size);
    assert_eq!(PROBE_BYTES, config.probe_bytes);
    assert_eq!(DEFAULT_ROWS, config.rows());
}

#[test]
fn test_config_defaults() {
    let config = Config::init_from_hashmap(&Default::default()).unwrap();
    assert_eq!(PathBuf::from(FILE_PATH), config.data_file());
    assert_eq!(CHUNK_SIZE, config.chunk_size);
}
