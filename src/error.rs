use thiserror::Error;

/// Conditions that stop a metrics run
#[derive(Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("question_id {question_id:?} (result #{position}) not found in reference data")]
    MissingReference { question_id: String, position: usize },

    #[error("question_id {question_id:?} appears more than once in reference data")]
    DuplicateReference { question_id: String },

    #[error("no evaluation results in {input_file}; accuracy is undefined")]
    NoResults { input_file: String },
}
