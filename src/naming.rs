use crate::config::MetricsConfig;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Used when the results file name carries no `YYYYMMDD-HHMM` stamp
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Run metadata derived from the results file name only
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    /// Base name of the results file
    pub input_file: String,
    pub timestamp: String,
    pub suffix: String,
    /// Where the metrics report is written
    pub output_path: PathBuf,
}

impl RunInfo {
    pub fn from_results_path(results_path: &Path, config: &MetricsConfig) -> Result<Self> {
        let input_file = results_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("Results path has no file name: {}", results_path.display()))?;

        let timestamp = extract_timestamp(&input_file)?;
        let suffix = derive_suffix(&input_file, config).to_string();
        let file_name = format!("{}{}{}.json", config.output_prefix, timestamp, suffix);
        let output_path = results_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(file_name);

        Ok(Self {
            input_file,
            timestamp,
            suffix,
            output_path,
        })
    }
}

/// First `8 digits - 4 digits` run in the file name, or "unknown"
pub fn extract_timestamp(file_name: &str) -> Result<String> {
    let pattern = Regex::new(r"(\d{8}-\d{4})").context("failed to compile timestamp regex")?;

    Ok(pattern
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string()))
}

/// Suffix of the first configured marker found in the file name
pub fn derive_suffix<'a>(file_name: &str, config: &'a MetricsConfig) -> &'a str {
    config
        .suffix_markers
        .iter()
        .find(|m| file_name.contains(&m.marker))
        .map(|m| m.suffix.as_str())
        .unwrap_or("")
}
