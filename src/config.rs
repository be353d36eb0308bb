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
//! Configuration of a comparison chart.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIN_SIZE: f64 = 5.0;
pub const DEFAULT_SMOOTHING_WINDOW: usize = 20;
pub const DEFAULT_OUTPUT_PATH: &str = "latency_mean_comparison.html";
pub const DEFAULT_TITLE: &str = "P2P latency to deliver CRDT operations.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Everything needed to produce one comparison chart. Passed explicitly to
/// [`crate::compare::compare_runs`], so the same pipeline can be invoked with different settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// One series is plotted per directory, in this order.
    pub run_directories: Vec<PathBuf>,
    /// Width of a time bin in seconds.
    pub bin_size_seconds: f64,
    /// Number of bins averaged by the trailing moving average.
    pub smoothing_window_bins: usize,
    /// Where the chart is written to.
    pub output_path: PathBuf,
    /// Fixed range of the latency axis. Overrides the auto-scaled range when set.
    pub fixed_y_range: Option<(f64, f64)>,
    /// If set, the plotted data is also written to this CSV file.
    pub csv_output_path: Option<PathBuf>,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            run_directories: Vec::new(),
            bin_size_seconds: DEFAULT_BIN_SIZE,
            smoothing_window_bins: DEFAULT_SMOOTHING_WINDOW,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fixed_y_range: Some((0.0, 100.0)),
            csv_output_path: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ChartConfig {
    /// Load a configuration from a JSON file. Missing fields take their default value.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let serialized = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&serialized)?;
        Ok(config)
    }

    /// Check that the numeric settings describe a meaningful chart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bin_size_seconds.is_finite() && self.bin_size_seconds > 0.0) {
            return Err(ConfigError::Invalid("bin size must be positive and finite"));
        }
        if self.smoothing_window_bins == 0 {
            return Err(ConfigError::Invalid("smoothing window must be at least one bin"));
        }
        if let Some((lo, hi)) = self.fixed_y_range {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(ConfigError::Invalid(
                    "fixed y range must be finite with lower < upper",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_size_seconds, 5.0);
        assert_eq!(config.smoothing_window_bins, 20);
        assert_eq!(config.fixed_y_range, Some((0.0, 100.0)));
    }

    #[test]
    fn rejects_bad_values() {
        for config in [
            ChartConfig {
                bin_size_seconds: 0.0,
                ..Default::default()
            },
            ChartConfig {
                bin_size_seconds: f64::NAN,
                ..Default::default()
            },
            ChartConfig {
                smoothing_window_bins: 0,
                ..Default::default()
            },
            ChartConfig {
                fixed_y_range: Some((10.0, 10.0)),
                ..Default::default()
            },
        ] {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(
            &path,
            r#"{ "run_directories": ["logs/crash", "logs/byzantine"], "fixed_y_range": null }"#,
        )
        .unwrap();
        let config = ChartConfig::from_file(&path).unwrap();
        assert_eq!(
            config.run_directories,
            vec![PathBuf::from("logs/crash"), PathBuf::from("logs/byzantine")]
        );
        assert_eq!(config.fixed_y_range, None);
        assert_eq!(config.smoothing_window_bins, DEFAULT_SMOOTHING_WINDOW);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ChartConfig::from_file(&path),
            Err(ConfigError::Json(_))
        ));
    }
}
