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
//! Merging the samples of all replicas of one run into a single point set.

use crate::extract::RawSample;

/// Issue times are logged in milliseconds, the point set is in seconds.
pub const MS_PER_SECOND: f64 = 1000.0;

/// All `(time, latency)` points of a single run, with time in seconds relative to the first sample
/// of the file each point originates from. Points are not sorted by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunPointSet {
    pub points: Vec<(f64, f64)>,
}

impl RunPointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest normalized time of all points, or `None` if there are no points.
    pub fn max_time(&self) -> Option<f64> {
        self.points.iter().map(|(t, _)| *t).reduce(f64::max)
    }

    /// Append the samples of one file, using the first sample (in file order) as the time origin.
    pub fn push_file(&mut self, samples: &[RawSample]) {
        let Some(origin) = samples.first().map(|s| s.issue_time) else {
            return;
        };
        self.points.extend(
            samples
                .iter()
                .map(|s| ((s.issue_time - origin) / MS_PER_SECOND, s.latency)),
        );
    }
}

/// Merge the samples of all files of a run. Returns `None` if no file contributed any sample.
pub fn build_point_set<I, S>(files: I) -> Option<RunPointSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[RawSample]>,
{
    let mut set = RunPointSet::default();
    for samples in files {
        set.push_file(samples.as_ref());
    }
    (!set.is_empty()).then_some(set)
}

#[cfg(test)]
mod test {
    use super::*;

    fn samples(xs: &[(f64, f64)]) -> Vec<RawSample> {
        xs.iter()
            .map(|&(issue_time, latency)| RawSample {
                issue_time,
                latency,
            })
            .collect()
    }

    #[test]
    fn normalizes_per_file() {
        let a = samples(&[(1000.0, 10.0), (3000.0, 30.0)]);
        let b = samples(&[(50_000.0, 7.0), (50_500.0, 8.0)]);
        let set = build_point_set([a, b]).unwrap();
        assert_eq!(
            set.points,
            vec![(0.0, 10.0), (2.0, 30.0), (0.0, 7.0), (0.5, 8.0)]
        );
        assert_eq!(set.max_time(), Some(2.0));
    }

    #[test]
    fn origin_is_first_sample_not_minimum() {
        let a = samples(&[(2000.0, 1.0), (1000.0, 2.0), (4000.0, 3.0)]);
        let set = build_point_set([a]).unwrap();
        assert_eq!(set.points, vec![(0.0, 1.0), (-1.0, 2.0), (2.0, 3.0)]);
    }

    #[test]
    fn empty_files_are_skipped() {
        let a = samples(&[]);
        let b = samples(&[(10.0, 5.0)]);
        let set = build_point_set([a, b]).unwrap();
        assert_eq!(set.points, vec![(0.0, 5.0)]);
    }

    #[test]
    fn no_samples_is_no_data() {
        assert!(build_point_set(Vec::<Vec<RawSample>>::new()).is_none());
        assert!(build_point_set([samples(&[]), samples(&[])]).is_none());
    }
}
