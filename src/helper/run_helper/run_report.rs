use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use itertools::Itertools;

use crate::helper::run_helper::*;

const READS_HEADER: [&str; 7] = [
    "",
    "n(demuxed)",
    "n(mapped)",
    "Min Len",
    "Max Len",
    "Median",
    "Mode",
];
const COVERAGE_HEADER: [&str; 4] = ["", "10x", "100x", "1000x"];

pub fn time_info_line(summary: &RunSummary) -> String {
    format!(
        "Latest FASTQ indicates run time of {}",
        format_elapsed(*summary.elapsed_time())
    )
}

/// Read counts and read length statistics, aggregate sample included.
pub fn read_count_rows(summary: &RunSummary) -> Vec<Vec<String>> {
    summary
        .rows()
        .map(|s| {
            let lengths = s.read_lengths();
            vec![
                s.name().clone(),
                s.demuxed_count().to_string(),
                s.mapped_count().to_string(),
                lengths.min_display(),
                lengths.max_display(),
                lengths.median_display(),
                lengths.mode_display(),
            ]
        })
        .collect()
}

/// Percent identity of every individual sample against the full panel.
pub fn reference_match_rows(summary: &RunSummary) -> Vec<Vec<String>> {
    summary
        .per_sample()
        .values()
        .map(|s| {
            std::iter::once(s.name().clone())
                .chain(s.ref_identities().iter().map(|r| r.identity.to_string()))
                .collect()
        })
        .collect()
}

/// Latest genome coverage of every individual sample. Samples without a
/// snapshot yet only show their name.
pub fn coverage_rows(summary: &RunSummary) -> Vec<Vec<String>> {
    summary
        .per_sample()
        .values()
        .map(|s| match s.latest_coverage() {
            Stat::Available(snapshot) => vec![
                s.name().clone(),
                format!("{}%", snapshot.over_10x),
                format!("{}%", snapshot.over_100x),
                format!("{}%", snapshot.over_1000x),
            ],
            Stat::Unavailable => vec![s.name().clone()],
        })
        .collect()
}

fn render_table(caption: &str, header: &[String], rows: &[Vec<String>]) -> String {
    let n_cols = rows
        .iter()
        .map(|r| r.len())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; n_cols];
    let all_rows = std::iter::once(header).chain(rows.iter().map(|r| r.as_slice()));
    for row in all_rows.clone() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    std::iter::once(caption.to_string())
        .chain(all_rows.map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .join("  ")
                .trim_end()
                .to_string()
        }))
        .join("\n")
}

fn owned(header: &[&str]) -> Vec<String> {
    header.iter().map(|h| h.to_string()).collect()
}

/// Plain text rendering of the run summary for the terminal.
pub fn render_text_report(summary: &RunSummary) -> String {
    let ref_header: Vec<String> = std::iter::once(String::new())
        .chain(summary.reference_names().iter().cloned())
        .collect();

    [
        format!("Time Information\n{}", time_info_line(summary)),
        render_table(
            "Reads (rounded to 10bp)",
            &owned(&READS_HEADER),
            &read_count_rows(summary),
        ),
        render_table(
            "Sample name - reference matches",
            &ref_header,
            &reference_match_rows(summary),
        ),
        render_table(
            "Approx Genome Coverages",
            &owned(&COVERAGE_HEADER),
            &coverage_rows(summary),
        ),
    ]
    .join("\n\n")
}

pub fn export_summary_to_json(summary: &RunSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// One row per sample (aggregate last) with read statistics, latest coverage
/// and one column per reference of the panel.
pub fn export_summary_to_csv(summary: &RunSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = owned(&[
        "sample",
        "demuxed_count",
        "mapped_count",
        "min_length",
        "max_length",
        "median_length",
        "mode_length",
        "mode_count",
        "mean_length",
        "latest_time",
        "over_10x",
        "over_100x",
        "over_1000x",
    ]);
    header.extend(summary.reference_names().iter().cloned());
    wtr.write_record(&header)?;

    fn cell<T: ToString>(value: Stat<T>) -> String {
        match value {
            Stat::Available(v) => v.to_string(),
            Stat::Unavailable => String::new(),
        }
    }

    for s in summary.rows() {
        let lengths = s.read_lengths();
        let coverage = *s.latest_coverage();
        let mut record = vec![
            s.name().clone(),
            s.demuxed_count().to_string(),
            s.mapped_count().to_string(),
            cell(*lengths.min()),
            cell(*lengths.max()),
            cell(*lengths.median()),
            cell(lengths.mode().map(|(len, _)| len)),
            cell(lengths.mode().map(|(_, n)| n)),
            cell(lengths.mean().map(|m| format!("{:.1}", m))),
            s.latest_time().to_string(),
            cell(coverage.map(|c| c.over_10x)),
            cell(coverage.map(|c| c.over_100x)),
            cell(coverage.map(|c| c.over_1000x)),
        ];
        record.extend(s.ref_identities().iter().map(|r| match r.identity {
            RefIdentity::Percent(p) => format!("{:.2}", p),
            RefIdentity::NoData => String::new(),
            RefIdentity::InsufficientData => "insufficient data".to_string(),
        }));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
