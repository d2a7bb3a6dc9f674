//! Downsampling of a per-position depth array into display columns.
//!
//! A coverage array spans the whole reference (tens of thousands of
//! positions) while the heat strip only has room for `width / px_per_column`
//! columns. Each column takes one depth value and is coloured by the depth
//! tier that value falls in.
//!
//! The default [`SamplingStrategy::Point`] reads the single position at the
//! start of each column's stride. It is O(columns) and deterministic but a
//! narrow dip or spike between two sampled positions is invisible. `Max` and
//! `Mean` look at every position of the stride and produce the same number of
//! columns.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::helper::run_helper::BinningError;

/// Depth above which a position is counted as covered at all.
pub const MIN_COVERED_DEPTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthThresholds {
    /// depth needed to call a consensus base
    pub consensus_coverage: u32,
    pub ok_coverage: u32,
}

impl DepthThresholds {
    pub fn new(consensus_coverage: u32, ok_coverage: u32) -> Self {
        DepthThresholds {
            consensus_coverage,
            ok_coverage,
        }
    }
}

/// Ordered from least to most covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthTier {
    None,
    Low,
    Medium,
    High,
}

impl DepthTier {
    /// Fill colour of the tier in the coverage strip.
    pub fn colour(&self) -> &'static str {
        match self {
            DepthTier::High => "#252525",
            DepthTier::Medium => "#636363",
            DepthTier::Low => "#969696",
            DepthTier::None => "#cccccc",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            DepthTier::High => (0x25, 0x25, 0x25),
            DepthTier::Medium => (0x63, 0x63, 0x63),
            DepthTier::Low => (0x96, 0x96, 0x96),
            DepthTier::None => (0xcc, 0xcc, 0xcc),
        }
    }

    /// One character per column for terminal output.
    pub fn glyph(&self) -> char {
        match self {
            DepthTier::High => '█',
            DepthTier::Medium => '▓',
            DepthTier::Low => '▒',
            DepthTier::None => '░',
        }
    }
}

pub fn classify(depth: u32, thresholds: &DepthThresholds) -> DepthTier {
    if depth > thresholds.consensus_coverage {
        DepthTier::High
    } else if depth > thresholds.ok_coverage {
        DepthTier::Medium
    } else if depth > MIN_COVERED_DEPTH {
        DepthTier::Low
    } else {
        DepthTier::None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// depth at the first position of each stride
    #[default]
    Point,
    /// deepest position of each stride
    Max,
    /// floored mean depth of each stride
    Mean,
}

impl FromStr for SamplingStrategy {
    type Err = BinningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Ok(SamplingStrategy::Point),
            "max" => Ok(SamplingStrategy::Max),
            "mean" => Ok(SamplingStrategy::Mean),
            _ => Err(BinningError::UnknownStrategy(s.to_string())),
        }
    }
}

impl Display for SamplingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingStrategy::Point => write!(f, "point"),
            SamplingStrategy::Max => write!(f, "max"),
            SamplingStrategy::Mean => write!(f, "mean"),
        }
    }
}

/// One display column of the coverage strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthBin {
    pub column: usize,
    /// first reference position the column stands for
    pub position: usize,
    pub depth: u32,
    pub tier: DepthTier,
}

/// Column layout resolved from the display and the coverage length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub n_intervals: usize,
    pub stride: usize,
    /// columns that map onto a real position, `n_intervals` unless the
    /// coverage is shorter than that
    pub n_columns: usize,
}

pub fn column_layout(
    coverage_len: usize,
    display_width_px: u32,
    px_per_column: u32,
) -> Result<ColumnLayout, BinningError> {
    if px_per_column == 0 {
        return Err(BinningError::ZeroColumnWidth);
    }
    let n_intervals = (display_width_px / px_per_column) as usize;
    if n_intervals == 0 {
        return Err(BinningError::NoColumns {
            width: display_width_px,
            px_per_column,
        });
    }
    if coverage_len == 0 {
        return Err(BinningError::EmptyCoverage);
    }

    // shorter than the strip: one position per column and fewer columns
    let stride = (coverage_len / n_intervals).max(1);
    let n_columns = n_intervals.min(coverage_len);

    Ok(ColumnLayout {
        n_intervals,
        stride,
        n_columns,
    })
}

/// Point-samples `coverage` into `floor(width / px_per_column)` columns;
/// column `i` is `coverage[i * stride]`.
pub fn bin_coverage(
    coverage: &[u32],
    display_width_px: u32,
    px_per_column: u32,
) -> Result<Vec<u32>, BinningError> {
    bin_coverage_with(
        coverage,
        display_width_px,
        px_per_column,
        SamplingStrategy::Point,
    )
}

pub fn bin_coverage_with(
    coverage: &[u32],
    display_width_px: u32,
    px_per_column: u32,
    strategy: SamplingStrategy,
) -> Result<Vec<u32>, BinningError> {
    let layout = column_layout(coverage.len(), display_width_px, px_per_column)?;

    let depths = (0..layout.n_columns)
        .map(|i| {
            let start = i * layout.stride;
            let end = (start + layout.stride).min(coverage.len());
            let window = &coverage[start..end];
            match strategy {
                SamplingStrategy::Point => coverage[start],
                SamplingStrategy::Max => window.iter().copied().max().unwrap_or(0),
                SamplingStrategy::Mean => {
                    let sum: u64 = window.iter().map(|&d| d as u64).sum();
                    (sum / window.len() as u64) as u32
                }
            }
        })
        .collect();

    Ok(depths)
}

/// Bins `coverage` and classifies every column.
pub fn bin_and_classify(
    coverage: &[u32],
    display_width_px: u32,
    px_per_column: u32,
    strategy: SamplingStrategy,
    thresholds: &DepthThresholds,
) -> Result<Vec<DepthBin>, BinningError> {
    let layout = column_layout(coverage.len(), display_width_px, px_per_column)?;
    let depths = bin_coverage_with(coverage, display_width_px, px_per_column, strategy)?;

    Ok(depths
        .into_iter()
        .enumerate()
        .map(|(column, depth)| DepthBin {
            column,
            position: column * layout.stride,
            depth,
            tier: classify(depth, thresholds),
        })
        .collect())
}
