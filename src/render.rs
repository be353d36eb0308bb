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
//! Drawing the comparison chart and persisting it, along with the raw data it shows.

use std::{fs, path::Path};

use plotly::{
    common::{DashType, Line, Mode, Title},
    layout::{Axis, Legend},
    Layout, Plot, Scatter,
};
use serde::Serialize;

use crate::{
    compare::{AxisRange, Comparison},
    config::ChartConfig,
};

pub const X_AXIS_TITLE: &str = "Time (seconds)";
pub const Y_AXIS_TITLE: &str = "Average Latency (ms)";
pub const LEGEND_TITLE: &str = "Algorithm";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
}

pub trait Renderer {
    /// Draw all series of `chart` within its axis bounds and persist the result.
    fn render(&self, chart: &Comparison, config: &ChartConfig) -> Result<(), RenderError>;
}

/// Renders the comparison as an interactive plotly chart, stored as a standalone HTML file at
/// `config.output_path`. Also writes the plotted data to `config.csv_output_path`, if set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotlyRenderer;

impl PlotlyRenderer {
    /// Build the plot without writing it anywhere.
    pub fn plot(&self, chart: &Comparison, config: &ChartConfig) -> Plot {
        let mut plot = Plot::new();

        let mut x_axis = Axis::new()
            .title(Title::with_text(X_AXIS_TITLE))
            .show_grid(true);
        if let Some(AxisRange { min, max }) = chart.x_range {
            x_axis = x_axis.range(vec![min, max]);
        }
        let mut y_axis = Axis::new()
            .title(Title::with_text(Y_AXIS_TITLE))
            .show_grid(true);
        if let Some(AxisRange { min, max }) = chart.y_range {
            y_axis = y_axis.range(vec![min, max]);
        }

        plot.set_layout(
            Layout::new()
                .title(Title::with_text(config.title.as_str()))
                .x_axis(x_axis)
                .y_axis(y_axis)
                .legend(Legend::new().title(Title::with_text(LEGEND_TITLE)))
                .width(1000)
                .height(600),
        );

        for series in &chart.series {
            let trace = Scatter::new(series.bin_starts.clone(), series.values.clone())
                .name(&series.label)
                .mode(Mode::Lines)
                .line(Line::new().width(2.0).dash(DashType::Dash))
                .connect_gaps(false);
            plot.add_trace(trace);
        }

        plot
    }
}

impl Renderer for PlotlyRenderer {
    fn render(&self, chart: &Comparison, config: &ChartConfig) -> Result<(), RenderError> {
        let plot = self.plot(chart, config);
        create_parent_dir(&config.output_path)?;
        log::debug!("Plotting {:?}", config.output_path);
        fs::write(&config.output_path, plot.to_html())?;

        if let Some(csv_path) = &config.csv_output_path {
            write_csv(chart, csv_path)?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct DataPoint<'a> {
    run: &'a str,
    bin_start: f64,
    mean_latency: Option<f64>,
}

/// Write all plotted points as `run,bin_start,mean_latency`. Missing values are left empty.
pub fn write_csv(chart: &Comparison, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    create_parent_dir(path)?;
    log::debug!("Writing plotted data to {path:?}");

    let mut csv = csv::WriterBuilder::new().has_headers(true).from_writer(
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
    );
    for series in &chart.series {
        for (bin_start, mean_latency) in series.bin_starts.iter().zip(&series.values) {
            csv.serialize(DataPoint {
                run: &series.label,
                bin_start: *bin_start,
                mean_latency: *mean_latency,
            })?;
        }
    }
    csv.flush()?;

    Ok(())
}

fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
