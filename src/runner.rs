use crate::config::MetricsConfig;
use crate::loader::{load_reference, load_results};
use crate::metrics::Aggregator;
use crate::models::MetricsReport;
use crate::naming::RunInfo;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Report computed by a run and the file it was written to
#[derive(Debug)]
pub struct RunOutcome {
    pub report: MetricsReport,
    pub output_path: PathBuf,
}

/// Loads one results file, aggregates it and writes the metrics report
pub struct Runner {
    config: MetricsConfig,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Run the aggregation for a results file against its reference data.
    ///
    /// Nothing is written unless the whole report was computed.
    pub fn run(&self, results_path: &Path, reference_path: &Path) -> Result<RunOutcome> {
        let run = RunInfo::from_results_path(results_path, &self.config)?;
        debug!(timestamp = %run.timestamp, suffix = %run.suffix, "derived run info");

        let results = load_results(results_path)?;
        info!(path = %results_path.display(), count = results.len(), "loaded evaluation results");

        let reference = load_reference(reference_path)?;
        info!(path = %reference_path.display(), count = reference.len(), "loaded reference data");

        let aggregator = Aggregator::new(&reference, &self.config.abstention_marker);
        let report = aggregator
            .compute_report(&results, &run)
            .with_context(|| format!("Failed to compute metrics for {}", run.input_file))?;

        self.store_report(&report, &run.output_path)?;

        Ok(RunOutcome {
            report,
            output_path: run.output_path,
        })
    }

    /// Store the report as pretty JSON, replacing any existing file
    fn store_report(&self, report: &MetricsReport, path: &Path) -> Result<()> {
        let json_content = self.serialize_report(report)?;
        self.write_report_file(path, &json_content)?;
        info!(path = %path.display(), "wrote metrics report");

        Ok(())
    }

    /// Serialize the report to JSON
    fn serialize_report(&self, report: &MetricsReport) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize metrics to JSON")
    }

    /// Write the report file
    fn write_report_file(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write metrics to: {}", path.display()))
    }
}
