use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The dataset as handed to the serializers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename = "Doubles")]
    pub doubles: Vec<f64>,
    #[serde(rename = "Ints")]
    pub ints: Vec<i32>,
}

impl Container {
    /// Row `i` holds `1.1 + i` and `i`
    pub fn synthetic(n: usize) -> Self {
        Container {
            doubles: (0..n).map(|i| 1.1 + i as f64).collect(),
            ints: (0..n).map(|i| i as i32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.doubles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doubles.is_empty()
    }
}

/// A serialization format for [`Container`]
pub trait Codec {
    const NAME: &'static str;
    /// Appended to the text data file name
    const EXTENSION: &'static str;

    fn serialize(container: &Container) -> Result<Vec<u8>>;
    fn deserialize(bytes: &[u8]) -> Result<Container>;
}

pub struct Json;

impl Codec for Json {
    const NAME: &'static str = "Json";
    const EXTENSION: &'static str = ".json";

    fn serialize(container: &Container) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(container)?)
    }

    fn deserialize(bytes: &[u8]) -> Result<Container> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Length prefixed compact binary encoding, fields in declaration order
pub struct Bincode;

impl Codec for Bincode {
    const NAME: &'static str = "Bincode";
    const EXTENSION: &'static str = ".bincode";

    fn serialize(container: &Container) -> Result<Vec<u8>> {
        Ok(bincode::serialize(container)?)
    }

    fn deserialize(bytes: &[u8]) -> Result<Container> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Path of the `C` encoded companion of the text data file
pub fn codec_path<C: Codec>(data_file: &Path) -> PathBuf {
    let mut name = data_file.as_os_str().to_owned();
    name.push(C::EXTENSION);
    name.into()
}

pub fn serialize_file<C: Codec>(path: &Path, container: &Container) -> Result<()> {
    fs::write(path, C::serialize(container)?)?;
    Ok(())
}

pub fn deserialize_file<C: Codec>(path: &Path) -> Result<Container> {
    let bytes = fs::read(path)?;
    C::deserialize(&bytes)
}
