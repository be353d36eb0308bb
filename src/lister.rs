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
//! Listing the replica log files of a run directory.

use std::path::{Path, PathBuf};

use itertools::Itertools;

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Pattern Error: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Glob Error: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),
}

pub trait FileLister {
    /// Return the log files of the run stored in `dir`.
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, ListError>;
}

/// Lists all files in a directory (non-recursively) whose name matches a glob pattern, sorted in
/// natural order (`log2.txt` before `log10.txt`).
#[derive(Debug, Clone)]
pub struct GlobLister {
    pattern: String,
}

impl GlobLister {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for GlobLister {
    fn default() -> Self {
        Self::new("*.txt")
    }
}

impl FileLister for GlobLister {
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, ListError> {
        if !dir.is_dir() {
            return Err(ListError::NotADirectory(dir.to_path_buf()));
        }
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            self.pattern
        );
        let files: Vec<PathBuf> = glob::glob(&pattern)?.collect::<Result<_, _>>()?;
        Ok(files
            .into_iter()
            .filter(|path| path.is_file())
            .sorted_by(|a, b| human_sort::compare(&a.to_string_lossy(), &b.to_string_lossy()))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn lists_txt_files_in_natural_order() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["log10.txt", "log2.txt", "notes.md", "log1.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("log3.txt"), "").unwrap();

        let files = GlobLister::default().list(dir.path()).unwrap();
        let names = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect_vec();
        assert_eq!(names, vec!["log1.txt", "log2.txt", "log10.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = GlobLister::default().list(&dir.path().join("missing"));
        assert!(matches!(result, Err(ListError::NotADirectory(_))));
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GlobLister::default().list(dir.path()).unwrap().is_empty());
    }
}
