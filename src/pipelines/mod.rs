use thiserror::Error;

use crate::config::ConfigError;
use crate::helper::run_helper::{BinningError, RunDataError};

pub mod coverage;
pub mod summary;
pub mod watch;

pub const LOG_FILE_NAME: &str = "runwatch.log";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Config Error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Run Data Error: {0}")]
    RunDataError(#[from] RunDataError),
    #[error("Coverage Binning Error: {0}")]
    BinningError(#[from] BinningError),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to write {0}: {1}")]
    OutputError(String, String),
}
