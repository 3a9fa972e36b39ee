use crate::error::MetricsError;
use crate::models::{EvaluationRecord, QuestionRecord};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

/// Reference records keyed by question id. Built once, read-only afterwards.
#[derive(Debug)]
pub struct ReferenceIndex {
    records: HashMap<String, QuestionRecord>,
}

impl ReferenceIndex {
    /// Build the index, rejecting duplicate question ids
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, MetricsError> {
        let mut map = HashMap::with_capacity(records.len());

        for record in records {
            match map.entry(record.question_id.clone()) {
                Entry::Occupied(_) => {
                    return Err(MetricsError::DuplicateReference {
                        question_id: record.question_id,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }

        Ok(Self { records: map })
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionRecord> {
        self.records.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Load newline-delimited evaluation records. Blank lines are skipped.
pub fn load_results(path: &Path) -> Result<Vec<EvaluationRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;

    parse_results(&content)
        .with_context(|| format!("Failed to parse results file: {}", path.display()))
}

/// Parse JSONL content into evaluation records
fn parse_results(content: &str) -> Result<Vec<EvaluationRecord>> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(line)
            .with_context(|| format!("Invalid evaluation record on line {}", index + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Load the reference dataset, a single JSON array of question records
pub fn load_reference(path: &Path) -> Result<ReferenceIndex> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference file: {}", path.display()))?;

    let records: Vec<QuestionRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse reference file: {}", path.display()))?;

    Ok(ReferenceIndex::new(records)?)
}
