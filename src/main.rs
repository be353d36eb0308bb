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
use std::path::PathBuf;

use clap::Parser;

use latency_chart::{compare, config::ChartConfig, prelude::*, util};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Directories holding the replica logs (`*.txt`) of one run each. Every directory becomes
    /// one line in the chart, labeled with the directory name.
    run_directories: Vec<PathBuf>,
    /// Load the configuration from a JSON file. Other arguments override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Width of a time bin in seconds.
    #[arg(short, long)]
    bin_size: Option<f64>,
    /// Number of bins averaged by the moving average.
    #[arg(short, long)]
    smooth_window: Option<usize>,
    /// Path of the generated chart.
    #[arg(short, long)]
    output_path: Option<PathBuf>,
    /// Fix the latency axis to the range `LO HI`.
    #[arg(short, long, num_args = 2, value_names = ["LO", "HI"], conflicts_with = "auto_y_range")]
    y_range: Option<Vec<f64>>,
    /// Scale the latency axis to the data instead of using a fixed range.
    #[arg(short, long)]
    auto_y_range: bool,
    /// Also write the plotted data to this CSV file.
    #[arg(long)]
    csv_output: Option<PathBuf>,
    /// Title of the chart.
    #[arg(short, long)]
    title: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<ChartConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_file(path)?,
            None => ChartConfig::default(),
        };

        if !self.run_directories.is_empty() {
            config.run_directories = self.run_directories;
        }
        if let Some(bin_size) = self.bin_size {
            config.bin_size_seconds = bin_size;
        }
        if let Some(window) = self.smooth_window {
            config.smoothing_window_bins = window;
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(range) = self.y_range {
            config.fixed_y_range = Some((range[0], range[1]));
        }
        if self.auto_y_range {
            config.fixed_y_range = None;
        }
        if let Some(csv_output) = self.csv_output {
            config.csv_output_path = Some(csv_output);
        }
        if let Some(title) = self.title {
            config.title = title;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let config = Args::parse().into_config()?;

    let comparison = compare::run(&config, &GlobLister::default(), &PlotlyRenderer)?;
    log::info!(
        "Plotted {} of {} runs to {:?}",
        comparison.series.len(),
        config.run_directories.len(),
        config.output_path
    );

    Ok(())
}
