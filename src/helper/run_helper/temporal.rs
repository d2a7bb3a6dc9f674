use crate::helper::run_helper::{RunData, Stat, TemporalSnapshot};

/// Most recent coverage snapshot of a sample.
pub fn latest_snapshot(series: &[TemporalSnapshot]) -> Stat<TemporalSnapshot> {
    series.last().copied().into()
}

/// Elapsed time of the most recent snapshot, 0 if the sample has none yet.
pub fn latest_time(series: &[TemporalSnapshot]) -> f64 {
    series.last().map(|s| s.time).unwrap_or(0.0)
}

/// Run time reported by the newest FASTQ across every sample, including the
/// aggregate sample.
pub fn run_latest_time(data: &RunData) -> f64 {
    data.values()
        .map(|sample| latest_time(&sample.temporal))
        .fold(0.0, f64::max)
}

/// Renders elapsed seconds as `1h 02m 03s`, `4m 05s` or `12s`.
pub fn format_elapsed(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::run_helper::SampleData;

    fn snapshot(time: f64, over_10x: f64) -> TemporalSnapshot {
        TemporalSnapshot {
            time,
            over_10x,
            ..Default::default()
        }
    }

    fn sample(times: &[f64]) -> SampleData {
        SampleData {
            temporal: times.iter().map(|&t| snapshot(t, 0.0)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_snapshot() {
        let series = vec![snapshot(10.0, 5.0), snapshot(20.0, 40.0)];
        assert_eq!(latest_snapshot(&series), Stat::Available(snapshot(20.0, 40.0)));
        assert_eq!(latest_snapshot(&[]), Stat::Unavailable);
    }

    #[test]
    fn test_latest_time() {
        assert_eq!(latest_time(&[snapshot(10.0, 0.0), snapshot(35.5, 0.0)]), 35.5);
        assert_eq!(latest_time(&[]), 0.0);
    }

    #[test]
    fn test_run_latest_time() {
        let mut data = RunData::new();
        data.insert("BC01".to_string(), sample(&[10.0, 60.0]));
        data.insert("BC02".to_string(), sample(&[]));
        data.insert("BC03".to_string(), sample(&[15.0, 45.0]));
        assert_eq!(run_latest_time(&data), 60.0);

        data.insert("all".to_string(), sample(&[90.0]));
        assert_eq!(run_latest_time(&data), 90.0);
    }

    #[test]
    fn test_run_latest_time_without_data() {
        let mut data = RunData::new();
        assert_eq!(run_latest_time(&data), 0.0);
        data.insert("BC01".to_string(), sample(&[]));
        assert_eq!(run_latest_time(&data), 0.0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "0s");
        assert_eq!(format_elapsed(12.4), "12s");
        assert_eq!(format_elapsed(245.0), "4m 05s");
        assert_eq!(format_elapsed(3723.0), "1h 02m 03s");
        assert_eq!(format_elapsed(f64::NAN), "0s");
    }
}
