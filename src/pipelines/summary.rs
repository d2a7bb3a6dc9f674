use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::helper::io::{ensure_output_dir, read_run_data};
use crate::helper::run_helper::*;
use crate::pipelines::{LOG_FILE_NAME, PipelineError};

pub const SUMMARY_JSON: &str = "run_summary.json";
pub const SUMMARY_CSV: &str = "run_summary.csv";

pub fn load_and_summarize(data_path: &Path, config_path: &Path) -> Result<RunSummary, PipelineError> {
    let config = RunConfig::from_path(config_path)?;
    let data = read_run_data(data_path)?;
    Ok(summarize(&data, &config))
}

/// Writes the JSON and CSV summaries into `output_dir` and appends a line to
/// the run log. Returns the paths written.
pub fn write_summary_outputs(
    summary: &RunSummary,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, PipelineError> {
    let output_dir = ensure_output_dir(output_dir)?;
    let json_path = output_dir.join(SUMMARY_JSON);
    let csv_path = output_dir.join(SUMMARY_CSV);

    export_summary_to_json(summary, &json_path)
        .map_err(|e| PipelineError::OutputError(json_path.display().to_string(), e.to_string()))?;
    export_summary_to_csv(summary, &csv_path)
        .map_err(|e| PipelineError::OutputError(csv_path.display().to_string(), e.to_string()))?;

    let mut log_writer = open_log(&output_dir.join(LOG_FILE_NAME))?;
    log_line(
        &mut log_writer,
        &format!(
            "Summarized {} samples, run time {}",
            summary.sample_count(),
            format_elapsed(*summary.elapsed_time())
        ),
    )?;

    Ok(vec![json_path, csv_path])
}

pub fn run_summary(
    data_path: &Path,
    config_path: &Path,
    output_dir: Option<&Path>,
) -> Result<RunSummary, PipelineError> {
    let summary = load_and_summarize(data_path, config_path)?;
    println!("{}", render_text_report(&summary));

    if let Some(output_dir) = output_dir {
        for path in write_summary_outputs(&summary, output_dir)? {
            println!("Written: {}", path.display());
        }
    }

    Ok(summary)
}
