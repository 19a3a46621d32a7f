use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::container::{codec_path, deserialize_file, Bincode, Codec, Json};
use crate::count::count_lines;
use crate::error::Result;
use crate::parse::{parse_chunked_file, parse_line_by_line_file, parse_split_file};
use crate::probe::read_file_at_once;
use crate::result::{ParseStats, ResultSet};
use crate::testdata::{create_test_data, test_data_exists};

const MB: u64 = 1024 * 1024;

/// Timed sections of a benchmark run, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ReadFile,
    CountLines,
    ChunkedParse,
    LineByLineParse,
    DeserializeBincode,
    DeserializeJson,
    StandardParse,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::ReadFile,
        Phase::CountLines,
        Phase::ChunkedParse,
        Phase::LineByLineParse,
        Phase::DeserializeBincode,
        Phase::DeserializeJson,
        Phase::StandardParse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::ReadFile => "ReadFile",
            Phase::CountLines => "Count Lines",
            Phase::ChunkedParse => "Chunked Parser",
            Phase::LineByLineParse => "Line By Line Parse",
            Phase::DeserializeBincode => "Deserialize Bincode",
            Phase::DeserializeJson => "Deserialize Json",
            Phase::StandardParse => "Standard Parse",
        }
    }
}

/// Outcome of one timed phase
#[derive(Clone, Debug)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Size of the input the phase consumed
    pub bytes: u64,
    pub elapsed: Duration,
    /// Lines or deserialized rows
    pub rows: usize,
}

impl PhaseReport {
    pub fn mb(&self) -> u64 {
        self.bytes / MB
    }

    pub fn mb_per_sec(&self) -> f64 {
        self.bytes as f64 / MB as f64 / self.elapsed.as_secs_f64()
    }
}

impl Display for PhaseReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<24}{} MB in {:.2}s, {:.2} MB/s",
            self.phase.name(),
            self.mb(),
            self.elapsed.as_secs_f64(),
            self.mb_per_sec()
        )?;
        if self.phase == Phase::CountLines {
            write!(f, ", {} lines", self.rows)?;
        }
        Ok(())
    }
}

/// Time `work` only, its output is dropped before the caller starts the next phase
fn timed<T>(work: impl FnOnce() -> Result<T>) -> Result<(T, Duration)> {
    let start = Instant::now();
    let out = work()?;
    Ok((out, start.elapsed()))
}

/// There is no collector to run between phases, the previous phase's buffers
/// are already freed. Only log where the process stands.
fn log_baseline(phase: Phase) {
    match memory_stats::memory_stats() {
        Some(usage) => debug!(phase = phase.name(), physical = usage.physical_mem, virtual_mem = usage.virtual_mem, "memory after phase"),
        None => debug!(phase = phase.name(), "memory usage unavailable"),
    }
}

fn report_stats(phase: Phase, stats: &ParseStats) {
    if stats.errors > 0 || stats.dropped_tail {
        warn!(phase = phase.name(), %stats, "lines skipped");
    }
}

fn parse_phase(phase: Phase, bytes: u64, work: impl FnOnce() -> Result<(ResultSet, ParseStats)>) -> Result<PhaseReport> {
    let ((result, stats), elapsed) = timed(work)?;
    report_stats(phase, &stats);
    Ok(PhaseReport { phase, bytes, elapsed, rows: result.len() })
}

fn deserialize_phase<C: Codec>(phase: Phase, data_file: &Path) -> Result<PhaseReport> {
    let path = codec_path::<C>(data_file);
    let bytes = fs::metadata(&path)?.len();
    let (container, elapsed) = timed(|| deserialize_file::<C>(&path))?;
    Ok(PhaseReport { phase, bytes, elapsed, rows: container.len() })
}

/// Run a single phase against the text file `data_file`.
///
/// `expected_rows` pre-sizes the result sets of the parsers.
pub fn run_phase(phase: Phase, config: &Config, data_file: &Path, expected_rows: usize) -> Result<PhaseReport> {
    let bytes = fs::metadata(data_file)?.len();

    let report = match phase {
        Phase::ReadFile => {
            let (read, elapsed) = timed(|| read_file_at_once(data_file, config.probe_bytes))?;
            PhaseReport { phase, bytes: read as u64, elapsed, rows: 0 }
        }
        Phase::CountLines => {
            let (lines, elapsed) = timed(|| count_lines(data_file))?;
            PhaseReport { phase, bytes, elapsed, rows: lines }
        }
        Phase::ChunkedParse => parse_phase(phase, bytes, || {
            parse_chunked_file(data_file, config.chunk_size, expected_rows)
        })?,
        Phase::LineByLineParse => parse_phase(phase, bytes, || parse_line_by_line_file(data_file, expected_rows))?,
        Phase::StandardParse => parse_phase(phase, bytes, || parse_split_file(data_file, expected_rows))?,
        Phase::DeserializeBincode => deserialize_phase::<Bincode>(phase, data_file)?,
        Phase::DeserializeJson => deserialize_phase::<Json>(phase, data_file)?,
    };

    log_baseline(phase);
    Ok(report)
}

/// Create the test data when missing, then run every [`Phase`] in order
pub fn run(config: &Config) -> Result<Vec<PhaseReport>> {
    let data_file = config.data_file();

    if !test_data_exists(&data_file) {
        info!(path = %data_file.display(), rows = config.rows(), "creating test data");
        create_test_data(&data_file, config.rows())?;
    }

    let mut reports = Vec::with_capacity(Phase::ALL.len());
    let mut expected_rows = 0;

    for phase in Phase::ALL {
        let report = run_phase(phase, config, &data_file, expected_rows)?;
        if phase == Phase::CountLines {
            expected_rows = report.rows;
        }
        info!(phase = phase.name(), elapsed = ?report.elapsed, rows = report.rows, "phase done");
        reports.push(report);
    }

    Ok(reports)
}

#[test]
fn test_phase_report_display() {
    let r = PhaseReport {
        phase: Phase::CountLines,
        bytes: 4 * MB,
        elapsed: Duration::from_secs(2),
        rows: 10,
    };
    assert_eq!("Count Lines             4 MB in 2.00s, 2.00 MB/s, 10 lines", r.to_string());

    let r = PhaseReport { phase: Phase::ReadFile, ..r };
    assert_eq!("ReadFile                4 MB in 2.00s, 2.00 MB/s", r.to_string());
}
