use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Question category. Declaration order is the order used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleSessionUser,
    SingleSessionPreference,
    SingleSessionAssistant,
    MultiSession,
    TemporalReasoning,
    KnowledgeUpdate,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        QuestionType::SingleSessionUser,
        QuestionType::SingleSessionPreference,
        QuestionType::SingleSessionAssistant,
        QuestionType::MultiSession,
        QuestionType::TemporalReasoning,
        QuestionType::KnowledgeUpdate,
    ];

    /// Name as it appears in dataset files
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleSessionUser => "single-session-user",
            QuestionType::SingleSessionPreference => "single-session-preference",
            QuestionType::SingleSessionAssistant => "single-session-assistant",
            QuestionType::MultiSession => "multi-session",
            QuestionType::TemporalReasoning => "temporal-reasoning",
            QuestionType::KnowledgeUpdate => "knowledge-update",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a haystack conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Set on turns that carry evidence for the answer
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_answer: bool,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            has_answer: false,
        }
    }
}

/// Ordered turns of one session
pub type Conversation = Vec<Turn>;

/// Reference record for one benchmark question.
///
/// The haystack is stored as three parallel arrays, matching the dataset files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question_id: String,
    pub question_type: QuestionType,
    pub question: String,
    pub answer: String,
    pub question_date: String,
    #[serde(default)]
    pub haystack_dates: Vec<String>,
    #[serde(default)]
    pub haystack_session_ids: Vec<String>,
    #[serde(default)]
    pub haystack_sessions: Vec<Conversation>,
    #[serde(default)]
    pub answer_session_ids: Vec<String>,
}

impl QuestionRecord {
    /// Haystack entries as (date, session id, conversation) triples
    pub fn haystack(&self) -> impl Iterator<Item = (&str, &str, &Conversation)> {
        self.haystack_dates
            .iter()
            .zip(&self.haystack_session_ids)
            .zip(&self.haystack_sessions)
            .map(|((date, id), session)| (date.as_str(), id.as_str(), session))
    }
}

/// Judge verdict attached to an evaluated answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoevalLabel {
    pub label: bool,
    pub model: String,
}

/// One line of the evaluation results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<String>,
    pub autoeval_label: AutoevalLabel,
}

impl EvaluationRecord {
    /// 1.0 for a correct judgment, 0.0 otherwise
    pub fn outcome(&self) -> f64 {
        if self.autoeval_label.label { 1.0 } else { 0.0 }
    }
}

/// Accuracy for one question category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    /// `None` when the category has no results
    pub accuracy: Option<f64>,
    pub count: usize,
}

/// Summary written to `qa_metrics_<timestamp><suffix>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub evaluation_results_by_task: BTreeMap<QuestionType, CategoryMetrics>,
    /// Mean of the populated per-category accuracies
    pub task_averaged_accuracy: f64,
    /// Mean over all results
    pub overall_accuracy: f64,
    pub abstention_accuracy: f64,
    pub abstention_count: usize,
    pub total_questions: usize,
    pub timestamp: String,
    pub input_file: String,
    pub model_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_wire_names() {
        for question_type in QuestionType::ALL {
            let json = serde_json::to_string(&question_type).unwrap();
            assert_eq!(json, format!("\"{}\"", question_type.as_str()));
        }
    }

    #[test]
    fn test_unknown_question_type_rejected() {
        let result: Result<QuestionType, _> = serde_json::from_str("\"open-domain\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_turn_has_answer_omitted_when_false() {
        let turn = Turn::new(Role::User, "hello");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);

        let parsed: Turn =
            serde_json::from_str(r#"{"role":"assistant","content":"hi","has_answer":true}"#)
                .unwrap();
        assert!(parsed.has_answer);
        assert_eq!(parsed.role, Role::Assistant);
    }

    #[test]
    fn test_haystack_triples() {
        let record = QuestionRecord {
            question_id: "q1".to_string(),
            question_type: QuestionType::MultiSession,
            question: "?".to_string(),
            answer: "!".to_string(),
            question_date: "2023/06/15 (Thu) 14:30".to_string(),
            haystack_dates: vec!["d1".to_string(), "d2".to_string()],
            haystack_session_ids: vec!["s1".to_string(), "s2".to_string()],
            haystack_sessions: vec![vec![Turn::new(Role::User, "a")], vec![]],
            answer_session_ids: vec!["s2".to_string()],
        };

        let triples: Vec<_> = record.haystack().collect();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].0, "d1");
        assert_eq!(triples[1].1, "s2");
        assert!(triples[1].2.is_empty());
    }

    #[test]
    fn test_evaluation_record_ignores_extra_fields() {
        let line = r#"{"question_id":"q1","hypothesis":"Python","autoeval_label":{"label":true,"model":"gpt-4o"},"extra":1}"#;
        let record: EvaluationRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.outcome(), 1.0);
        assert_eq!(record.hypothesis.as_deref(), Some("Python"));
    }

    #[test]
    fn test_report_categories_serialize_in_declaration_order() {
        let mut by_task = BTreeMap::new();
        by_task.insert(
            QuestionType::KnowledgeUpdate,
            CategoryMetrics { accuracy: None, count: 0 },
        );
        by_task.insert(
            QuestionType::SingleSessionUser,
            CategoryMetrics { accuracy: Some(1.0), count: 1 },
        );

        let json = serde_json::to_string(&by_task).unwrap();
        let user = json.find("single-session-user").unwrap();
        let update = json.find("knowledge-update").unwrap();
        assert!(user < update);
        assert!(json.contains(r#""accuracy":null"#));
    }
}
