use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::helper::run_helper::DepthBin;

pub const STRIP_HEIGHT_PX: u32 = 20;

// function to draw the coverage strip using plotters crate, one filled
// column of `px_per_column` pixels per bin

pub fn plot_coverage_strip(
    bins: &[DepthBin],
    px_per_column: u32,
    height: u32,
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    if bins.is_empty() || px_per_column == 0 || height == 0 {
        return Err("Nothing to draw: no bins or zero sized strip".into());
    }
    let width = bins.len() as u32 * px_per_column;

    let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    for bin in bins {
        let (r, g, b) = bin.tier.rgb();
        let x0 = (bin.column as u32 * px_per_column) as i32;
        let x1 = x0 + px_per_column as i32;
        root.draw(&Rectangle::new(
            [(x0, 0), (x1, height as i32)],
            RGBColor(r, g, b).filled(),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Renders bins as a line of block characters, one per column.
pub fn coverage_strip_text(bins: &[DepthBin]) -> String {
    bins.iter().map(|b| b.tier.glyph()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::run_helper::{DepthThresholds, SamplingStrategy, bin_and_classify};

    fn bins() -> Vec<DepthBin> {
        let coverage: Vec<u32> = (0..400).map(|i| i * 5).collect();
        bin_and_classify(
            &coverage,
            120,
            3,
            SamplingStrategy::Point,
            &DepthThresholds::new(1000, 100),
        )
        .unwrap()
    }

    #[test]
    fn test_coverage_strip_text() {
        let bins = bins();
        let text = coverage_strip_text(&bins);
        assert_eq!(text.chars().count(), 40);
        assert!(text.starts_with('░'));
        assert!(text.ends_with('█'));
    }

    #[test]
    fn test_plot_coverage_strip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        plot_coverage_strip(&bins(), 3, STRIP_HEIGHT_PX, &path).unwrap();
        assert!(path.exists());

        assert!(plot_coverage_strip(&[], 3, STRIP_HEIGHT_PX, &path).is_err());
    }
}
