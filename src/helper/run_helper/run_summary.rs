use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use getset::Getters;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::helper::run_helper::*;

/// Derived view of one sample, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct SampleSummary {
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    demuxed_count: u64,
    #[getset(get = "pub")]
    mapped_count: u64,
    #[getset(get = "pub")]
    read_lengths: HistogramStats,
    #[getset(get = "pub")]
    latest_time: f64,
    #[getset(get = "pub")]
    latest_coverage: Stat<TemporalSnapshot>,
    /// one entry per reference of the panel, in panel order
    #[getset(get = "pub")]
    ref_identities: Vec<ReferenceIdentity>,
}

impl SampleSummary {
    pub fn from_sample(name: &str, sample: &SampleData, config: &RunConfig) -> Self {
        SampleSummary {
            name: name.to_string(),
            demuxed_count: sample.demuxed_count,
            mapped_count: sample.mapped_count,
            read_lengths: compute_stats(&sample.read_lengths),
            latest_time: latest_time(&sample.temporal),
            latest_coverage: latest_snapshot(&sample.temporal),
            ref_identities: score_panel(&sample.ref_matches, &config.reference_panel),
        }
    }

    pub fn identity_for(&self, reference: &str) -> Option<&RefIdentity> {
        self.ref_identities
            .iter()
            .find(|r| r.reference == reference)
            .map(|r| &r.identity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct RunSummary {
    #[getset(get = "pub")]
    generated_at: DateTime<Local>,
    #[getset(get = "pub")]
    current_version: String,
    /// newest FASTQ time over every sample, seconds
    #[getset(get = "pub")]
    elapsed_time: f64,
    #[getset(get = "pub")]
    reference_names: Vec<String>,
    /// individual samples, without the run aggregate
    #[getset(get = "pub")]
    per_sample: BTreeMap<String, SampleSummary>,
    /// the run aggregate sample, if the upstream pipeline provided one
    #[getset(get = "pub")]
    overall: Option<SampleSummary>,
}

impl RunSummary {
    /// Samples in display order: individual samples first, then the run
    /// aggregate.
    pub fn rows(&self) -> impl Iterator<Item = &SampleSummary> {
        self.per_sample.values().chain(self.overall.iter())
    }

    pub fn sample_count(&self) -> usize {
        self.per_sample.len()
    }
}

/// Summarizes every sample of the run. Samples are independent, so they are
/// processed in parallel; the result does not depend on scheduling.
pub fn summarize(data: &RunData, config: &RunConfig) -> RunSummary {
    let per_sample: BTreeMap<String, SampleSummary> = data
        .par_iter()
        .filter(|(name, _)| name.as_str() != ALL_SAMPLES)
        .map(|(name, sample)| {
            (
                name.clone(),
                SampleSummary::from_sample(name, sample, config),
            )
        })
        .collect();

    let overall = data
        .get(ALL_SAMPLES)
        .map(|sample| SampleSummary::from_sample(ALL_SAMPLES, sample, config));

    RunSummary {
        generated_at: Local::now(),
        current_version: env!("CARGO_PKG_VERSION").to_string(),
        elapsed_time: run_latest_time(data),
        reference_names: config.reference_names(),
        per_sample,
        overall,
    }
}
