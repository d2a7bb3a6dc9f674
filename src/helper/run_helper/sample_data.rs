use std::collections::BTreeMap;

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};

/// Name of the synthetic sample that carries the whole-run aggregate.
pub const ALL_SAMPLES: &str = "all";

/// Key of the reference match table holding the number of reads compared.
pub const MATCH_TOTAL_KEY: &str = "total";

/// Every sample of a run keyed by sample name, as written by the upstream
/// demultiplexing/mapping pipeline.
pub type RunData = BTreeMap<String, SampleData>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleData {
    #[serde(default)]
    pub temporal: Vec<TemporalSnapshot>,
    #[serde(default)]
    pub read_lengths: ReadLengthHistogram,
    #[serde(default, deserialize_with = "null_or_number_to_u64")]
    pub demuxed_count: u64,
    #[serde(default, deserialize_with = "null_or_number_to_u64")]
    pub mapped_count: u64,
    #[serde(default)]
    pub ref_matches: RefMatchTable,
    // per-position depth over the reference, may be absent early in a run
    #[serde(default)]
    pub coverage: Vec<u32>,
}

/// Coverage progress of one sample at a point in the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalSnapshot {
    /// elapsed seconds since the start of the run
    pub time: f64,
    #[serde(default, rename = "over10x")]
    pub over_10x: f64,
    #[serde(default, rename = "over100x")]
    pub over_100x: f64,
    #[serde(default, rename = "over1000x")]
    pub over_1000x: f64,
}

/// Sparse `(length, count)` pairs sorted by length. Zero counts are padding
/// inserted for plotting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadLengthHistogram {
    #[serde(default, rename = "xyValues")]
    pub xy_values: Vec<(u32, u64)>,
}

impl ReadLengthHistogram {
    pub fn new(xy_values: Vec<(u32, u64)>) -> Self {
        ReadLengthHistogram { xy_values }
    }
}

/// Reference name -> number of reads best matching it, plus the `total` key.
pub type RefMatchTable = BTreeMap<String, RawCount>;

/// Counts are written as strings by the upstream pipeline; plain numbers are
/// accepted too. Anything else is kept so it can be reported per reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(u64),
    Text(String),
    Other(serde_json::Value),
}

impl RawCount {
    pub fn parse(&self) -> Option<u64> {
        match self {
            RawCount::Number(n) => Some(*n),
            RawCount::Text(s) => s.trim().parse::<u64>().ok(),
            RawCount::Other(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawCount::Other(serde_json::Value::Null))
    }
}

// counts are rendered as `count || 0` upstream, so null reads as zero
fn null_or_number_to_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let val: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match val {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(num) => num
            .as_u64()
            .ok_or_else(|| Error::custom(format!("Invalid read count: {}", num))),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::custom(format!("Invalid read count: {}", s))),
        other => Err(Error::custom(format!("Invalid read count: {}", other))),
    }
}

impl From<&str> for RawCount {
    fn from(value: &str) -> Self {
        RawCount::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "BC01": {
            "temporal": [{"time": 30, "over10x": 12.5, "over100x": 1.0, "over1000x": 0}],
            "readLengths": {"xyValues": [[100, 0], [150, 2]]},
            "demuxedCount": 40,
            "refMatches": {"refA": "30", "refB": 4, "total": "120", "refC": null}
        },
        "all": {}
    }"#;

    #[test]
    fn test_run_data_from_json() {
        let data: RunData = serde_json::from_str(SAMPLE_JSON).unwrap();
        assert_eq!(data.len(), 2);

        let bc01 = &data["BC01"];
        assert_eq!(bc01.temporal[0].time, 30.0);
        assert_eq!(bc01.temporal[0].over_10x, 12.5);
        assert_eq!(bc01.read_lengths.xy_values, vec![(100, 0), (150, 2)]);
        assert_eq!(bc01.demuxed_count, 40);
        assert_eq!(bc01.mapped_count, 0);
        assert!(bc01.coverage.is_empty());

        assert_eq!(bc01.ref_matches["refA"].parse(), Some(30));
        assert_eq!(bc01.ref_matches["refB"].parse(), Some(4));
        assert_eq!(bc01.ref_matches["refC"].parse(), None);
        assert_eq!(bc01.ref_matches[MATCH_TOTAL_KEY].parse(), Some(120));

        assert_eq!(data[ALL_SAMPLES], SampleData::default());
    }

    #[test]
    fn test_null_read_counts_read_as_zero() {
        let json = r#"{
            "BC01": {"demuxedCount": null, "mappedCount": null},
            "BC02": {"demuxedCount": "12", "mappedCount": 9}
        }"#;
        let data: RunData = serde_json::from_str(json).unwrap();
        assert_eq!(data["BC01"].demuxed_count, 0);
        assert_eq!(data["BC01"].mapped_count, 0);
        assert_eq!(data["BC02"].demuxed_count, 12);
        assert_eq!(data["BC02"].mapped_count, 9);
    }

    #[test]
    fn test_raw_count_parse() {
        assert_eq!(RawCount::from(" 12 ").parse(), Some(12));
        assert_eq!(RawCount::from("12.5").parse(), None);
        assert_eq!(RawCount::from("abc").parse(), None);
        assert_eq!(RawCount::from("-3").parse(), None);
    }
}
