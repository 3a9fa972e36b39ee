use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filename marker mapped to the suffix appended to the metrics file name
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuffixMarker {
    /// Substring searched for in the results file name
    pub marker: String,
    /// Suffix appended after the timestamp
    pub suffix: String,
}

/// Settings for the metrics aggregator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricsConfig {
    /// Substring of a question id that marks an abstention question
    #[serde(default = "default_abstention_marker")]
    pub abstention_marker: String,
    /// Prefix of the metrics file name
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
    /// Checked in order, the first marker found in the file name wins
    #[serde(default = "default_suffix_markers")]
    pub suffix_markers: Vec<SuffixMarker>,
}

fn default_abstention_marker() -> String {
    "_abs".to_string()
}

fn default_output_prefix() -> String {
    "qa_metrics_".to_string()
}

fn default_suffix_markers() -> Vec<SuffixMarker> {
    vec![
        SuffixMarker {
            marker: "polychat_mem".to_string(),
            suffix: "_polychat_mem".to_string(),
        },
        SuffixMarker {
            marker: "polychat".to_string(),
            suffix: "_polychat".to_string(),
        },
    ]
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            abstention_marker: default_abstention_marker(),
            output_prefix: default_output_prefix(),
            suffix_markers: default_suffix_markers(),
        }
    }
}

impl MetricsConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
