pub mod coverage_bins;
pub mod coverage_plot;
pub mod error;
pub mod read_lengths;
pub mod ref_matches;
pub mod run_report;
pub mod run_summary;
pub mod sample_data;
pub mod stat;
pub mod temporal;
pub mod utils;

pub use coverage_bins::{
    ColumnLayout, DepthBin, DepthThresholds, DepthTier, SamplingStrategy, bin_and_classify,
    bin_coverage, bin_coverage_with, classify, column_layout,
};
pub use coverage_plot::{coverage_strip_text, plot_coverage_strip};
pub use error::{BinningError, RunDataError};
pub use read_lengths::{HistogramStats, compute_stats};
pub use ref_matches::{RefIdentity, ReferenceIdentity, percent_identity, score_panel};
pub use run_report::{
    export_summary_to_csv, export_summary_to_json, render_text_report, time_info_line,
};
pub use run_summary::{RunSummary, SampleSummary, summarize};
pub use sample_data::{
    ALL_SAMPLES, MATCH_TOTAL_KEY, RawCount, ReadLengthHistogram, RefMatchTable, RunData,
    SampleData, TemporalSnapshot,
};
pub use stat::Stat;
pub use temporal::{format_elapsed, latest_snapshot, latest_time, run_latest_time};
pub use utils::{log_line, open_log};
