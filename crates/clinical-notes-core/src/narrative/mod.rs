//! Narrative generator for clinical questionnaires.
//!
//! Pipeline: Answers → Filled check → Total score → Severity band → Narrative
//!
//! One generic [`Questionnaire`] engine is instantiated per definition; the
//! built-in IIEF-5, PEDT and PE-clinical vocabularies live in [`builtin`].

pub mod builtin;
mod engine;
mod registry;

pub use engine::*;
pub use registry::*;

use thiserror::Error;

/// Narrative generator errors.
///
/// Only configuration and strict answer validation can fail; scoring and
/// narrative generation are total.
#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Invalid questionnaire definition: {0}")]
    InvalidDefinition(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Unknown option '{code}' for question '{question}'")]
    UnknownOption { question: String, code: String },
}

pub type NarrativeResult<T> = Result<T, NarrativeError>;
