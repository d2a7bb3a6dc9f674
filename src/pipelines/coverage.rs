use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::helper::io::{ensure_output_dir, read_run_data};
use crate::helper::run_helper::*;
use crate::pipelines::{LOG_FILE_NAME, PipelineError};

/// Classified coverage strip of one sample, as written to
/// `<sample>_coverage_bins.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStrip {
    pub sample: String,
    pub coverage_length: usize,
    pub display_width_px: u32,
    pub px_per_column: u32,
    pub stride: usize,
    pub strategy: SamplingStrategy,
    pub thresholds: DepthThresholds,
    pub bins: Vec<DepthBin>,
}

impl CoverageStrip {
    pub fn build(
        sample: &str,
        coverage: &[u32],
        display_width_px: u32,
        config: &RunConfig,
        strategy: SamplingStrategy,
    ) -> Result<Self, BinningError> {
        let thresholds = config.thresholds();
        let layout = column_layout(coverage.len(), display_width_px, config.px_per_column)?;
        let bins = bin_and_classify(
            coverage,
            display_width_px,
            config.px_per_column,
            strategy,
            &thresholds,
        )?;

        Ok(CoverageStrip {
            sample: sample.to_string(),
            coverage_length: coverage.len(),
            display_width_px,
            px_per_column: config.px_per_column,
            stride: layout.stride,
            strategy,
            thresholds,
            bins,
        })
    }
}

pub fn run_coverage(
    data_path: &Path,
    config_path: &Path,
    sample: &str,
    display_width_px: u32,
    strategy: SamplingStrategy,
    output_dir: Option<&Path>,
) -> Result<CoverageStrip, PipelineError> {
    let config = RunConfig::from_path(config_path)?;
    let data = read_run_data(data_path)?;
    let sample_data = data
        .get(sample)
        .ok_or_else(|| RunDataError::SampleNotFound(sample.to_string()))?;

    let strip = CoverageStrip::build(
        sample,
        &sample_data.coverage,
        display_width_px,
        &config,
        strategy,
    )?;

    println!(
        "{}: {} positions in {} columns ({} sampling, stride {})",
        sample,
        strip.coverage_length,
        strip.bins.len(),
        strategy,
        strip.stride
    );
    println!("{}", coverage_strip_text(&strip.bins));

    if let Some(output_dir) = output_dir {
        let output_dir = ensure_output_dir(output_dir)?;
        let json_path = output_dir.join(format!("{}_coverage_bins.json", sample));
        let png_path = output_dir.join(format!("{}_coverage.png", sample));

        let writer = BufWriter::new(File::create(&json_path)?);
        serde_json::to_writer_pretty(writer, &strip).map_err(|e| {
            PipelineError::OutputError(json_path.display().to_string(), e.to_string())
        })?;
        plot_coverage_strip(
            &strip.bins,
            strip.px_per_column,
            coverage_plot::STRIP_HEIGHT_PX,
            &png_path,
        )
        .map_err(|e| PipelineError::OutputError(png_path.display().to_string(), e.to_string()))?;

        let mut log_writer = open_log(&output_dir.join(LOG_FILE_NAME))?;
        log_line(
            &mut log_writer,
            &format!(
                "Binned coverage of {} into {} columns",
                sample,
                strip.bins.len()
            ),
        )?;
        println!("Written: {}", json_path.display());
        println!("Written: {}", png_path.display());
    }

    Ok(strip)
}
