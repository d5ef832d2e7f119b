//! Result Writer: persists one RunResult per run as pretty-printed JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::info;

use crate::interview::models::RunResult;

const FILENAME_PREFIX: &str = "interview_results_";
const FILENAME_SUFFIX: &str = ".json";

/// `interview_results_20261016_140322.json`
pub fn results_filename(timestamp: &NaiveDateTime) -> String {
    format!(
        "{FILENAME_PREFIX}{}{FILENAME_SUFFIX}",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Newest results file in `dir`, or `None` when there is none (or no `dir`).
///
/// The embedded timestamp is zero-padded, so the newest run has the greatest name.
pub fn latest_results(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to list results directory {}", dir.display()))
        }
    };

    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to list results directory {}", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.starts_with(FILENAME_PREFIX) || !name.ends_with(FILENAME_SUFFIX) {
            continue;
        }
        if latest.as_deref().map_or(true, |current| name.as_str() > current) {
            latest = Some(name);
        }
    }

    Ok(latest.map(|name| dir.join(name)))
}

/// Writes `result` into `dir` (created if missing) and returns the file path.
/// Overwrites a file of the same name.
pub fn write_results(dir: &Path, result: &RunResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))?;

    let path = dir.join(results_filename(&result.interview_date));
    let json = serde_json::to_string_pretty(result).context("Failed to serialize run result")?;

    fs::write(&path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;

    info!("Results saved to: {}", path.display());
    Ok(path)
}

pub fn read_results(path: &Path) -> Result<RunResult> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed results file {}", path.display()))
}
