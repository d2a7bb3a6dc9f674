use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinningError {
    #[error("Column width must be at least 1px")]
    ZeroColumnWidth,
    #[error("Display width of {width}px cannot fit a single {px_per_column}px column")]
    NoColumns { width: u32, px_per_column: u32 },
    #[error("Coverage array is empty")]
    EmptyCoverage,
    #[error("Unknown sampling strategy: {0}, expected one of point, max, mean")]
    UnknownStrategy(String),
}

#[derive(Error, Debug)]
pub enum RunDataError {
    #[error("Run data file does not exist: {0}")]
    DataFileNotFound(String),
    #[error("Failed to read run data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse run data JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sample {0} not found in run data")]
    SampleNotFound(String),
}
