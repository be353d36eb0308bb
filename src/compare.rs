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
//! Runs the latency pipeline once per run directory and collects the series of all runs, together
//! with axis bounds shared by all of them.

use std::path::Path;

use serde::Serialize;

use crate::{
    binning::bin_points,
    config::{ChartConfig, ConfigError},
    extract::read_samples,
    lister::FileLister,
    render::{RenderError, Renderer},
    series::build_point_set,
    smoothing::smooth,
};

/// Relative margin added above and below the auto-scaled latency range.
pub const Y_MARGIN: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render Error: {0}")]
    Render(#[from] RenderError),
}

/// The smoothed latency series of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSeries {
    /// Name of the run directory.
    pub label: String,
    pub bin_starts: Vec<f64>,
    /// Smoothed mean latency per bin, parallel to `bin_starts`.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Everything handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// One entry per run that yielded data, in configuration order.
    pub series: Vec<RunSeries>,
    /// `0` up to the largest bin start of any run. `None` if there is no series.
    pub x_range: Option<AxisRange>,
    /// Either the configured fixed range, or the range of all smoothed values with a margin of
    /// [`Y_MARGIN`]. `None` if neither is available.
    pub y_range: Option<AxisRange>,
}

/// Name used for a run in the legend: the last component of its directory.
pub fn run_label(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Process a single run directory: list its files, extract, merge, bin and smooth. Returns `None`
/// (after logging why) if the run yields no data.
pub fn process_run(
    dir: &Path,
    config: &ChartConfig,
    lister: &impl FileLister,
) -> Option<RunSeries> {
    let label = run_label(dir);

    let files = match lister.list(dir) {
        Ok(files) => files,
        Err(e) => {
            log::warn!("Cannot list the logs of {label} in {dir:?}\n    Error: {e}");
            return None;
        }
    };

    let samples = files
        .iter()
        .map(|file| {
            read_samples(file).unwrap_or_else(|e| {
                log::warn!("Skipping unreadable log {file:?}\n    Error: {e}");
                Vec::new()
            })
        })
        .collect::<Vec<_>>();

    let Some(points) = build_point_set(&samples) else {
        log::warn!("No data found for {label}");
        return None;
    };
    let binned = bin_points(&points, config.bin_size_seconds)?;
    let values = smooth(&binned.values, config.smoothing_window_bins);

    log::info!(
        "{label}: {} files, {} samples, {} bins",
        files.len(),
        points.len(),
        binned.len()
    );

    Some(RunSeries {
        label,
        bin_starts: binned.starts,
        values,
    })
}

/// Compute the latency range of all series, widened by [`Y_MARGIN`] on both sides.
///
/// If all values are equal, the range is widened by [`Y_MARGIN`] of that value instead (or by
/// one if the value is zero), such that the axis never collapses to a single point.
pub fn auto_y_range(series: &[RunSeries]) -> Option<AxisRange> {
    let (min, max) = series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold(None, |acc: Option<(f64, f64)>, &y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })?;
    let margin = if max > min {
        (max - min) * Y_MARGIN
    } else if min != 0.0 {
        min.abs() * Y_MARGIN
    } else {
        1.0
    };
    Some(AxisRange {
        min: min - margin,
        max: max + margin,
    })
}

/// Run the pipeline for every configured run directory, in order, and compute the shared axis
/// bounds. Runs without data are skipped.
pub fn compare_runs(
    config: &ChartConfig,
    lister: &impl FileLister,
) -> Result<Comparison, ConfigError> {
    config.validate()?;
    if config.run_directories.is_empty() {
        log::warn!("No run directories configured, the chart will be empty");
    }

    let series: Vec<RunSeries> = config
        .run_directories
        .iter()
        .filter_map(|dir| process_run(dir, config, lister))
        .collect();

    if series.is_empty() && !config.run_directories.is_empty() {
        log::warn!(
            "None of the {} run directories contained any latency data",
            config.run_directories.len()
        );
    }

    let x_range = series
        .iter()
        .filter_map(|s| s.bin_starts.last().copied())
        .reduce(f64::max)
        .map(|max| AxisRange { min: 0.0, max });

    let y_range = match config.fixed_y_range {
        Some(range) => Some(range.into()),
        None => auto_y_range(&series),
    };

    Ok(Comparison {
        series,
        x_range,
        y_range,
    })
}

/// Compare all runs and hand the result to `renderer`.
pub fn run(
    config: &ChartConfig,
    lister: &impl FileLister,
    renderer: &impl Renderer,
) -> Result<Comparison, Error> {
    let comparison = compare_runs(config, lister)?;
    renderer.render(&comparison, config)?;
    Ok(comparison)
}
