use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::helper::run_helper::{ReadLengthHistogram, Stat};

/// Summary of a read length histogram. Every field is `Unavailable` when the
/// histogram holds no reads.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct HistogramStats {
    #[getset(get = "pub")]
    min: Stat<u32>,
    #[getset(get = "pub")]
    max: Stat<u32>,
    #[getset(get = "pub")]
    median: Stat<u32>,
    /// (length, number of reads at that length)
    #[getset(get = "pub")]
    mode: Stat<(u32, u64)>,
    #[getset(get = "pub")]
    mean: Stat<f64>,
    #[getset(get = "pub")]
    total_count: Stat<u64>,
}

impl HistogramStats {
    pub fn unavailable() -> Self {
        HistogramStats {
            min: Stat::Unavailable,
            max: Stat::Unavailable,
            median: Stat::Unavailable,
            mode: Stat::Unavailable,
            mean: Stat::Unavailable,
            total_count: Stat::Unavailable,
        }
    }

    pub fn min_display(&self) -> String {
        self.min.display_with(|v| format!("{}bp", v))
    }

    pub fn max_display(&self) -> String {
        self.max.display_with(|v| format!("{}bp", v))
    }

    pub fn median_display(&self) -> String {
        self.median.display_with(|v| format!("{}bp", v))
    }

    pub fn mode_display(&self) -> String {
        self.mode
            .display_with(|(len, n)| format!("{}bp (n={})", len, n))
    }
}

/// Computes min/max/median/mode over the reads described by `histogram`.
///
/// Zero-count entries are dropped first. The median is the length at which
/// the running read count first exceeds half of all reads, i.e. the upper
/// median for even totals; the mode keeps the shortest length on ties.
pub fn compute_stats(histogram: &ReadLengthHistogram) -> HistogramStats {
    let entries: Vec<(u32, u64)> = histogram
        .xy_values
        .iter()
        .copied()
        .filter(|&(_, count)| count != 0)
        .collect();

    let (first, last) = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return HistogramStats::unavailable(),
    };

    let total: u64 = entries.iter().map(|&(_, count)| count).sum();
    let half = total as f64 / 2.0;

    let mut cumulative = 0u64;
    let mut median = None;
    let mut mode = first;
    let mut weighted_sum = 0f64;

    for &(length, count) in &entries {
        cumulative += count;
        if median.is_none() && cumulative as f64 > half {
            median = Some(length);
        }
        if count > mode.1 {
            mode = (length, count);
        }
        weighted_sum += length as f64 * count as f64;
    }

    HistogramStats {
        min: Stat::Available(first.0),
        max: Stat::Available(last.0),
        // the last entry always pushes the running count past half
        median: Stat::Available(median.unwrap_or(last.0)),
        mode: Stat::Available(mode),
        mean: Stat::Available(weighted_sum / total as f64),
        total_count: Stat::Available(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(values: &[(u32, u64)]) -> ReadLengthHistogram {
        ReadLengthHistogram::new(values.to_vec())
    }

    #[test]
    fn test_compute_stats_with_padding() {
        let stats = compute_stats(&hist(&[(100, 0), (150, 2), (200, 5), (250, 1)]));
        assert_eq!(*stats.min(), Stat::Available(150));
        assert_eq!(*stats.max(), Stat::Available(250));
        assert_eq!(*stats.total_count(), Stat::Available(8));
        assert_eq!(*stats.mode(), Stat::Available((200, 5)));
        assert_eq!(*stats.median(), Stat::Available(200));
        assert_eq!(*stats.mean(), Stat::Available(1550.0 / 8.0));

        assert_eq!(stats.min_display(), "150bp");
        assert_eq!(stats.max_display(), "250bp");
        assert_eq!(stats.median_display(), "200bp");
        assert_eq!(stats.mode_display(), "200bp (n=5)");
    }

    #[test]
    fn test_compute_stats_empty() {
        assert_eq!(compute_stats(&hist(&[])), HistogramStats::unavailable());
        // padding only
        let stats = compute_stats(&hist(&[(100, 0), (110, 0)]));
        assert_eq!(stats, HistogramStats::unavailable());
        assert_eq!(stats.min_display(), "NA");
        assert_eq!(stats.mode_display(), "NA");
    }

    #[test]
    fn test_median_first_entry_strictly_past_half() {
        // total 4, half 2: cumulative [2, 4], 2 is not > 2 so the median is 20
        let stats = compute_stats(&hist(&[(10, 2), (20, 2)]));
        assert_eq!(*stats.median(), Stat::Available(20));

        // total 5, half 2.5: cumulative [3, 5]
        let stats = compute_stats(&hist(&[(10, 3), (20, 2)]));
        assert_eq!(*stats.median(), Stat::Available(10));
    }

    #[test]
    fn test_mode_ties_keep_shortest_length() {
        let stats = compute_stats(&hist(&[(300, 4), (310, 1), (320, 4)]));
        assert_eq!(*stats.mode(), Stat::Available((300, 4)));
    }

    #[test]
    fn test_single_entry() {
        let stats = compute_stats(&hist(&[(500, 1)]));
        assert_eq!(*stats.min(), Stat::Available(500));
        assert_eq!(*stats.max(), Stat::Available(500));
        assert_eq!(*stats.median(), Stat::Available(500));
        assert_eq!(*stats.mode(), Stat::Available((500, 1)));
    }

    #[test]
    fn test_median_within_bounds_and_mode_is_entry() {
        let histograms = vec![
            vec![(1, 1), (2, 1), (3, 1), (4, 1)],
            vec![(50, 9), (60, 1)],
            vec![(50, 1), (60, 9)],
            vec![(0, 0), (400, 7), (410, 0), (420, 3), (430, 3), (440, 0)],
        ];
        for values in histograms {
            let stats = compute_stats(&hist(&values));
            let (min, max, median) = match (stats.min(), stats.max(), stats.median()) {
                (Stat::Available(a), Stat::Available(b), Stat::Available(c)) => (*a, *b, *c),
                _ => panic!("stats should be available for {:?}", values),
            };
            assert!(min <= median && median <= max);
            let mode = stats.mode().into_option().unwrap();
            assert!(values.contains(&mode));
        }
    }
}
