use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::chunk::BOM;
use crate::container::{codec_path, serialize_file, Bincode, Codec, Container, Json};
use crate::error::Result;
use crate::lines::NEW_LINE;

const BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Write `n` synthetic rows as BOM prefixed text to `path`, and the same
/// [`Container`] next to it in every [`Codec`] format.
pub fn create_test_data(path: &Path, n: usize) -> Result<()> {
    let start = Instant::now();
    write_text(path, n)?;
    info!(path = %path.display(), rows = n, elapsed = ?start.elapsed(), "text data written");

    let container = Container::synthetic(n);
    write_codec::<Json>(path, &container)?;
    write_codec::<Bincode>(path, &container)?;
    Ok(())
}

/// Row `i` is `"{1.1 + i} {i}"` followed by the platform [`NEW_LINE`]
pub fn write_text(path: &Path, n: usize) -> Result<()> {
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, File::create(path)?);
    writer.write_all(BOM)?;
    for i in 0..n {
        write!(writer, "{} {i}", 1.1 + i as f64)?;
        writer.write_all(NEW_LINE)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_codec<C: Codec>(path: &Path, container: &Container) -> Result<()> {
    let start = Instant::now();
    let target = codec_path::<C>(path);
    serialize_file::<C>(&target, container)?;
    info!(path = %target.display(), codec = C::NAME, elapsed = ?start.elapsed(), "serialized data written");
    Ok(())
}

/// The text file and all serialized companions are present
pub fn test_data_exists(path: &Path) -> bool {
    path.exists() && codec_path::<Json>(path).exists() && codec_path::<Bincode>(path).exists()
}

#[test]
fn test_create_test_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NumericData.txt");
    assert!(!test_data_exists(&path));

    create_test_data(&path, 3).unwrap();
    assert!(test_data_exists(&path));

    let mut expected = BOM.to_vec();
    for line in ["1.1 0", "2.1 1", "3.1 2"] {
        expected.extend_from_slice(line.as_bytes());
        expected.extend_from_slice(NEW_LINE);
    }
    assert_eq!(expected, std::fs::read(&path).unwrap());
}
