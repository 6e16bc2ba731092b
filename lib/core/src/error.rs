use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset is empty or not loaded")]
    EmptyDataset,

    #[error("Target pin not found: {0}")]
    UnknownTarget(String),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid feature weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid field mapping: {0}")]
    InvalidMapping(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
