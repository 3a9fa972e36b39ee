use crate::error::MetricsError;
use crate::loader::ReferenceIndex;
use crate::models::{CategoryMetrics, EvaluationRecord, MetricsReport, QuestionType};
use crate::naming::RunInfo;
use std::collections::BTreeMap;
use tracing::debug;

/// Model name reported when no result carries one
const UNKNOWN_MODEL: &str = "unknown";

/// True when the question id marks an abstention question
pub fn is_abstention(question_id: &str, marker: &str) -> bool {
    question_id.contains(marker)
}

/// Round to 4 decimal places, exact ties go to the even digit
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// Mean of the values, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Turns judged results into a [`MetricsReport`]
pub struct Aggregator<'a> {
    reference: &'a ReferenceIndex,
    abstention_marker: &'a str,
}

impl<'a> Aggregator<'a> {
    pub fn new(reference: &'a ReferenceIndex, abstention_marker: &'a str) -> Self {
        Self {
            reference,
            abstention_marker,
        }
    }

    /// Group 0/1 outcomes by the category of the referenced question.
    ///
    /// Every category gets a bucket, possibly empty. Fails on the first result
    /// whose id is missing from the reference data.
    pub fn bucket_by_category(
        &self,
        results: &[EvaluationRecord],
    ) -> Result<BTreeMap<QuestionType, Vec<f64>>, MetricsError> {
        let mut buckets: BTreeMap<QuestionType, Vec<f64>> =
            QuestionType::ALL.iter().map(|&t| (t, Vec::new())).collect();

        for (index, result) in results.iter().enumerate() {
            let reference = self.reference.get(&result.question_id).ok_or_else(|| {
                MetricsError::MissingReference {
                    question_id: result.question_id.clone(),
                    position: index + 1,
                }
            })?;

            buckets
                .entry(reference.question_type)
                .or_default()
                .push(result.outcome());
        }

        Ok(buckets)
    }

    /// Outcomes of the results that belong to the abstention subset
    pub fn abstention_outcomes(&self, results: &[EvaluationRecord]) -> Vec<f64> {
        results
            .iter()
            .filter(|r| is_abstention(&r.question_id, self.abstention_marker))
            .map(EvaluationRecord::outcome)
            .collect()
    }

    /// Compute the full report for one results file
    pub fn compute_report(
        &self,
        results: &[EvaluationRecord],
        run: &RunInfo,
    ) -> Result<MetricsReport, MetricsError> {
        if results.is_empty() {
            return Err(MetricsError::NoResults {
                input_file: run.input_file.clone(),
            });
        }

        let buckets = self.bucket_by_category(results)?;
        let evaluation_results_by_task = self.summarize_categories(&buckets);
        let task_averaged_accuracy = self.calculate_task_average(&buckets);

        let outcomes: Vec<f64> = results.iter().map(EvaluationRecord::outcome).collect();
        let overall_accuracy = mean(&outcomes).map(round4).unwrap_or_default();

        let abstention = self.abstention_outcomes(results);
        let abstention_accuracy = mean(&abstention).map(round4).unwrap_or(0.0);

        let model_used = results
            .first()
            .map(|r| r.autoeval_label.model.clone())
            .unwrap_or_else(|| UNKNOWN_MODEL.to_string());

        Ok(MetricsReport {
            evaluation_results_by_task,
            task_averaged_accuracy,
            overall_accuracy,
            abstention_accuracy,
            abstention_count: abstention.len(),
            total_questions: results.len(),
            timestamp: run.timestamp.clone(),
            input_file: run.input_file.clone(),
            model_used,
        })
    }

    /// Per-category accuracy and count; empty categories have no accuracy
    fn summarize_categories(
        &self,
        buckets: &BTreeMap<QuestionType, Vec<f64>>,
    ) -> BTreeMap<QuestionType, CategoryMetrics> {
        buckets
            .iter()
            .map(|(&question_type, outcomes)| {
                debug!(category = %question_type, count = outcomes.len(), "category bucket");
                let metrics = CategoryMetrics {
                    accuracy: mean(outcomes).map(round4),
                    count: outcomes.len(),
                };
                (question_type, metrics)
            })
            .collect()
    }

    /// Unweighted mean of the populated category means
    fn calculate_task_average(&self, buckets: &BTreeMap<QuestionType, Vec<f64>>) -> f64 {
        let category_means: Vec<f64> = buckets.values().filter_map(|v| mean(v)).collect();
        mean(&category_means).map(round4).unwrap_or_default()
    }
}
