use crate::models::{MetricsReport, QuestionRecord};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Console output format options
#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Operator summary of a metrics report, one entry per console line
pub fn report_lines(report: &MetricsReport) -> Vec<String> {
    let mut lines = vec![String::new(), "Evaluation results by task:".to_string()];

    for (question_type, metrics) in &report.evaluation_results_by_task {
        let accuracy = match metrics.accuracy {
            Some(accuracy) => format!("{:?}", accuracy),
            None => "n/a".to_string(),
        };
        lines.push(format!("\t{}: {} ({})", question_type, accuracy, metrics.count));
    }

    lines.push(String::new());
    lines.push(format!(
        "Task-averaged Accuracy: {:?}",
        report.task_averaged_accuracy
    ));
    lines.push(format!("Overall Accuracy: {:?}", report.overall_accuracy));
    lines.push(format!(
        "Abstention Accuracy: {:?} ({})",
        report.abstention_accuracy, report.abstention_count
    ));

    lines
}

/// Line announcing where the report was written
pub fn saved_line(path: &Path) -> String {
    format!("\nMetrics saved to: {}", path.display())
}

/// Print a metrics report followed by its output path
pub fn print_report(report: &MetricsReport, path: &Path, format: OutputFormat) {
    match format {
        OutputFormat::Plain => print_lines(&report_lines(report)),
        OutputFormat::Json => print_json(report),
    }
    println!("{}", saved_line(path));
}

/// Announcement printed before the sample dataset is written
pub fn generating_line(count: usize) -> String {
    format!("Generating sample longmemeval data with {} questions...", count)
}

/// Fatal error and its causes, one entry per stderr line
pub fn error_lines(err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", err)];
    lines.extend(err.chain().skip(1).map(|cause| format!("  caused by: {}", cause)));
    lines
}

/// Summary of generated sample data, one entry per console line
pub fn sample_lines(records: &[QuestionRecord], path: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("Successfully created {}", path.display()),
        format!("Generated {} questions", records.len()),
    ];

    for (i, record) in records.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("Question {}:", i + 1));
        lines.push(format!("  ID: {}", record.question_id));
        lines.push(format!("  Question: {}", record.question));
        lines.push(format!("  Answer: {}", record.answer));
        lines.push(format!("  Haystack sessions: {}", record.haystack().count()));
    }

    lines
}

/// Print the generated sample data summary
pub fn print_samples(records: &[QuestionRecord], path: &Path, format: OutputFormat) {
    match format {
        OutputFormat::Plain => print_lines(&sample_lines(records, path)),
        OutputFormat::Json => print_json(records),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Print any serializable value as pretty JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryMetrics, QuestionType};
    use std::collections::BTreeMap;

    fn create_test_report() -> MetricsReport {
        let mut by_task = BTreeMap::new();
        for question_type in QuestionType::ALL {
            by_task.insert(
                question_type,
                CategoryMetrics {
                    accuracy: None,
                    count: 0,
                },
            );
        }
        by_task.insert(
            QuestionType::SingleSessionUser,
            CategoryMetrics {
                accuracy: Some(1.0),
                count: 2,
            },
        );
        by_task.insert(
            QuestionType::TemporalReasoning,
            CategoryMetrics {
                accuracy: Some(0.5),
                count: 2,
            },
        );

        MetricsReport {
            evaluation_results_by_task: by_task,
            task_averaged_accuracy: 0.75,
            overall_accuracy: 0.75,
            abstention_accuracy: 0.0,
            abstention_count: 0,
            total_questions: 4,
            timestamp: "unknown".to_string(),
            input_file: "results.jsonl".to_string(),
            model_used: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_report_lines_order() {
        let lines = report_lines(&create_test_report());

        assert_eq!(lines[1], "Evaluation results by task:");
        assert_eq!(lines[2], "\tsingle-session-user: 1.0 (2)");
        assert_eq!(lines[3], "\tsingle-session-preference: n/a (0)");
        assert_eq!(lines[6], "\ttemporal-reasoning: 0.5 (2)");
        assert_eq!(lines[7], "\tknowledge-update: n/a (0)");
        assert_eq!(lines[9], "Task-averaged Accuracy: 0.75");
        assert_eq!(lines[10], "Overall Accuracy: 0.75");
        assert_eq!(lines[11], "Abstention Accuracy: 0.0 (0)");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_saved_line() {
        let line = saved_line(Path::new("out/qa_metrics_unknown.json"));
        assert_eq!(line, "\nMetrics saved to: out/qa_metrics_unknown.json");
    }

    #[test]
    fn test_sample_lines() {
        let records = crate::generator::generate_sample_data();
        let lines = sample_lines(&records, Path::new("longmemeval_small.json"));

        assert_eq!(lines[0], "Successfully created longmemeval_small.json");
        assert_eq!(lines[1], "Generated 2 questions");
        assert!(lines.contains(&"  Answer: Italian".to_string()));
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.as_str() == "  Haystack sessions: 3")
                .count(),
            2
        );
    }

    #[test]
    fn test_generating_line() {
        assert_eq!(
            generating_line(2),
            "Generating sample longmemeval data with 2 questions..."
        );
    }

    #[test]
    fn test_error_lines_include_causes() {
        let err = anyhow::anyhow!("invalid value on line 3")
            .context("Failed to parse results file: results.jsonl");
        let lines = error_lines(&err);

        assert_eq!(
            lines,
            vec![
                "Error: Failed to parse results file: results.jsonl".to_string(),
                "  caused by: invalid value on line 3".to_string(),
            ]
        );
    }
}
