use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use flate2::read::MultiGzDecoder;

use crate::helper::json::FromJsonString;
use crate::helper::run_helper::{RunData, RunDataError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Json,
    JsonGz,
}

impl DataType {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => DataType::JsonGz,
            _ => DataType::Json,
        }
    }
}

/// Reads the per-sample snapshot written by the upstream pipeline. Files
/// ending in `.gz` are decompressed on the fly.
pub fn read_run_data(path: &Path) -> Result<RunData, RunDataError> {
    if !path.is_file() {
        return Err(RunDataError::DataFileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;

    let stream: Box<dyn Read> = match DataType::from_path(path) {
        DataType::Json => Box::new(BufReader::new(file)),
        DataType::JsonGz => Box::new(MultiGzDecoder::new(BufReader::new(file))),
    };

    Ok(RunData::from_json_reader(BufReader::new(stream))?)
}

/// Modification time and length of a file. Two rewrites within the
/// filesystem's mtime resolution that keep the same length still look equal.
pub fn file_stamp(path: &Path) -> io::Result<(SystemTime, u64)> {
    let metadata = fs::metadata(path)?;
    Ok((metadata.modified()?, metadata.len()))
}

pub fn ensure_output_dir(output: &Path) -> io::Result<PathBuf> {
    if output.is_file() {
        return Err(io::Error::other(format!(
            "Output path '{}' must be a directory",
            output.display()
        )));
    } else if !output.exists() {
        fs::create_dir_all(output)?;
    }
    Ok(output.to_path_buf())
}
