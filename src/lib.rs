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
//! Library for turning per-replica latency logs of several experiment runs into a single
//! comparison chart of the smoothed mean latency over time.

pub mod binning;
pub mod compare;
pub mod config;
pub mod extract;
pub mod lister;
pub mod render;
pub mod series;
pub mod smoothing;
pub mod util;

pub mod prelude {
    pub use super::{
        binning::{bin_points, BinnedSeries},
        compare::{compare_runs, AxisRange, Comparison, RunSeries},
        config::ChartConfig,
        extract::{extract_samples, read_samples, RawSample},
        lister::{FileLister, GlobLister},
        render::{PlotlyRenderer, Renderer},
        series::{build_point_set, RunPointSet},
        smoothing::smooth,
    };
}
