// latency-chart: Comparison of Replica Latencies across Experiment Runs
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Aggregation of a run's point set into fixed-width time bins.

use crate::series::RunPointSet;

/// Mean latency per time bin. `starts` and `values` are parallel and ordered by bin index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinnedSeries {
    /// Left edge of every bin, in seconds.
    pub starts: Vec<f64>,
    /// Mean latency of the bin, or `None` if no point fell into it.
    pub values: Vec<Option<f64>>,
}

impl BinnedSeries {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Generate the bin edges `0, s, 2s, ...` by repeated addition, as long as the edge is at most
/// `max_time + bin_size`. The last edge is always strictly larger than `max_time`.
///
/// The number of edges grows with `max_time / bin_size` and is not capped: a single log line with
/// an absolute (e.g. epoch) issue time among relative ones leads to a huge number of bins.
pub fn bin_edges(max_time: f64, bin_size: f64) -> Vec<f64> {
    let stop = max_time + bin_size;
    log::debug!(
        "Generating about {:.0} bins of {bin_size}s up to {max_time}s",
        (stop / bin_size).floor()
    );
    let mut edges = vec![0.0];
    let mut next = bin_size;
    while next <= stop {
        edges.push(next);
        next += bin_size;
    }
    edges
}

/// Partition the points into bins of width `bin_size` seconds and compute the mean latency of
/// each bin. Returns `None` for an empty point set.
///
/// `bin_size` must be positive and finite.
pub fn bin_points(points: &RunPointSet, bin_size: f64) -> Option<BinnedSeries> {
    let max_time = points.max_time()?;
    let edges = bin_edges(max_time, bin_size);
    let num_bins = edges.len() - 1;

    let mut sums = vec![0.0; num_bins];
    let mut counts = vec![0usize; num_bins];
    let mut dropped = 0usize;

    for &(t, latency) in &points.points {
        // index of the last edge that is <= t
        match edges.partition_point(|e| *e <= t).checked_sub(1) {
            Some(k) if k < num_bins => {
                sums[k] += latency;
                counts[k] += 1;
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} points lying before the first bin");
    }

    let values = sums
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
        .collect();

    Some(BinnedSeries {
        starts: edges[..num_bins].to_vec(),
        values,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(points: &[(f64, f64)]) -> RunPointSet {
        RunPointSet {
            points: points.to_vec(),
        }
    }

    #[test]
    fn single_bin() {
        let binned = bin_points(&set(&[(0.0, 10.0), (2.0, 30.0)]), 5.0).unwrap();
        assert_eq!(binned.starts, vec![0.0]);
        assert_eq!(binned.values, vec![Some(20.0)]);
    }

    #[test]
    fn edges_cover_max_time() {
        assert_eq!(bin_edges(2.0, 5.0), vec![0.0, 5.0]);
        assert_eq!(bin_edges(5.0, 5.0), vec![0.0, 5.0, 10.0]);
        assert_eq!(bin_edges(0.0, 1.0), vec![0.0, 1.0]);
        for max_time in [0.0, 0.1, 4.99, 5.0, 12.3, 100.0] {
            let edges = bin_edges(max_time, 0.7);
            assert!(*edges.last().unwrap() > max_time);
            assert!(edges.len() >= 2);
        }
    }

    #[test]
    fn bin_count_follows_max_time() {
        assert_eq!(bin_edges(1000.0, 1.0).len(), 1002);
        assert_eq!(bin_edges(999.5, 10.0).len(), 101);
    }

    #[test]
    fn point_on_max_time_is_kept() {
        let binned = bin_points(&set(&[(0.0, 1.0), (5.0, 3.0)]), 5.0).unwrap();
        assert_eq!(binned.starts, vec![0.0, 5.0]);
        assert_eq!(binned.values, vec![Some(1.0), Some(3.0)]);
    }

    #[test]
    fn empty_bins_have_no_data() {
        let binned = bin_points(&set(&[(0.5, 4.0), (0.7, 6.0), (3.2, 9.0)]), 1.0).unwrap();
        assert_eq!(binned.starts, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(binned.values, vec![Some(5.0), None, None, Some(9.0)]);
    }

    #[test]
    fn unsorted_points() {
        let a = bin_points(&set(&[(3.0, 1.0), (0.0, 2.0), (1.5, 3.0), (0.5, 4.0)]), 1.0);
        let b = bin_points(&set(&[(0.0, 2.0), (0.5, 4.0), (1.5, 3.0), (3.0, 1.0)]), 1.0);
        assert_eq!(a, b);
        assert_eq!(
            a.unwrap().values,
            vec![Some(3.0), Some(3.0), None, Some(1.0)]
        );
    }

    #[test]
    fn negative_times_are_dropped() {
        let binned = bin_points(&set(&[(-1.0, 100.0), (0.0, 2.0), (2.0, 4.0)]), 5.0).unwrap();
        assert_eq!(binned.values, vec![Some(3.0)]);
    }

    #[test]
    fn empty_set_is_no_data() {
        assert!(bin_points(&RunPointSet::default(), 5.0).is_none());
    }
}
