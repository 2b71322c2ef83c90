use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("No price data for {ticker} (looked for {})", path.display())]
    DataNotFound { ticker: String, path: PathBuf },

    #[error("Invalid data in {}: {message}", path.display())]
    InvalidData { path: PathBuf, message: String },
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        CliError::Usage(err.to_string().trim_end().to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
