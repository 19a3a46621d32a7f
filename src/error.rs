use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("config error: {0}")]
    Config(#[from] envconfig::Error),

    /// A single line did not fit into an empty chunk
    #[error("line longer than chunk capacity of {capacity} bytes")]
    LineTooLong { capacity: usize },
}
