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
//! Extraction of `(issue_time, latency)` samples from a single replica log file.
//!
//! A replica log starts with arbitrary summary lines (total adds, state hash, ...), followed by a
//! `Latencies:` marker line. Every non-blank line after the marker is expected to carry the issue
//! time of an operation (in milliseconds) and its observed latency as the first two numbers on
//! that line.

use std::{fs, path::Path};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single latency measurement as written by a replica.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RawSample {
    /// Time at which the operation was issued, in milliseconds on the replica's clock.
    pub issue_time: f64,
    /// Observed latency of the operation.
    pub latency: f64,
}

/// Position of the parser within a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the marker line, everything is ignored.
    Preamble,
    /// After the marker line, every line is a candidate sample.
    Latencies,
}

lazy_static! {
    static ref MARKER: Regex = Regex::new(r"(?i)latencies:?").unwrap();
    static ref NUMBER: Regex = Regex::new(r"[-+]?(?:\d*\.\d+|\d+)").unwrap();
}

/// Read the log file at `path` and extract all samples from it.
///
/// The file is read in full and closed before parsing. An unreadable file is reported as an
/// error, such that the caller can decide to skip it.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<RawSample>, ExtractError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let samples = extract_samples(&content);
    log::trace!("Extracted {} samples from {path:?}", samples.len());
    Ok(samples)
}

/// Extract all samples from the text of a single log file.
///
/// Lines before the (case-insensitive) `Latencies` marker are ignored, and the marker line itself
/// never yields a sample. Lines after the marker with fewer than two numbers are dropped silently.
/// A file without marker yields no samples.
pub fn extract_samples(content: &str) -> Vec<RawSample> {
    let mut section = Section::Preamble;
    let mut samples = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match section {
            Section::Preamble => {
                if MARKER.is_match(line) {
                    section = Section::Latencies;
                }
            }
            Section::Latencies => {
                if let Some(sample) = parse_sample(line) {
                    samples.push(sample);
                }
            }
        }
    }

    samples
}

/// Parse the first two numeric tokens of a line as issue time and latency.
fn parse_sample(line: &str) -> Option<RawSample> {
    let mut tokens = NUMBER.find_iter(line).map(|m| m.as_str());
    let issue_time = parse_number(tokens.next()?)?;
    let latency = parse_number(tokens.next()?)?;
    Some(RawSample {
        issue_time,
        latency,
    })
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|x| x.is_finite())
}
