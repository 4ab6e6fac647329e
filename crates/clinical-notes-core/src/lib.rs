//! Clinical Notes Core Library
//!
//! Pure evaluation logic behind the clinical records UI: lab value flagging and
//! questionnaire-to-narrative generation.
//!
//! # Architecture
//!
//! ```text
//! Lab report rows ──► Test-name normalization ──► Panel history merge
//!        │
//!        └──────────► Reference-range parsing ──► Abnormal flag (row highlight)
//!
//! Questionnaire answers ──► Filled? ──► Total ──► Severity band
//!                                                     │
//!                                                     ▼
//!                                          Narrative ──► append to clinical note
//!                                                        (host callback)
//! ```
//!
//! # Core Principle
//!
//! **Nothing here claims more than it can prove.** An abnormal flag of `false`
//! means "not proven abnormal": missing values and unrecognised reference
//! ranges are never highlighted. An empty questionnaire is "not evaluated",
//! never the lowest severity band.
//!
//! # Modules
//!
//! - [`models`]: Domain types (LabResult, ReferenceRange, AnswerSet, SeverityBand, etc.)
//! - [`lab`]: Test-name normalization, reference-range evaluation, panel merging
//! - [`narrative`]: Generic questionnaire engine, built-in vocabularies, registry

pub mod lab;
pub mod models;
pub mod narrative;

// Re-export commonly used types
pub use lab::merge_panels;
pub use models::{
    AnswerSet, BandColor, Evaluation, LabPanel, LabResult, LabSeries, NarrativeExport,
    QuestionnaireDefinition, QuestionnaireForm, QuestionnaireKind, ReferenceRange, SeverityBand,
};
pub use narrative::{NarrativeError, Questionnaire, QuestionnaireRegistry};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ClinicalNotesError {
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<NarrativeError> for ClinicalNotesError {
    fn from(e: NarrativeError) -> Self {
        match e {
            NarrativeError::InvalidDefinition(msg) => ClinicalNotesError::InvalidDefinition(msg),
            NarrativeError::Json(e) => ClinicalNotesError::SerializationError(e.to_string()),
            NarrativeError::UnknownQuestionnaire(id) => ClinicalNotesError::NotFound(id),
            other @ (NarrativeError::UnknownQuestion(_) | NarrativeError::UnknownOption { .. }) => {
                ClinicalNotesError::InvalidInput(other.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ClinicalNotesError {
    fn from(e: serde_json::Error) -> Self {
        ClinicalNotesError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Logging
// =========================================================================

/// Install a stderr log subscriber filtered by `RUST_LOG`.
///
/// Defaults to `clinical_notes_core=info`. Later calls are no-ops.
#[uniffi::export]
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("clinical_notes_core=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// =========================================================================
// Lab Evaluator (exported to FFI)
// =========================================================================

/// Normalize a test name for comparison.
#[uniffi::export]
pub fn normalize_test_name(name: String) -> String {
    lab::normalize_test_name(&name)
}

/// Whether two test names refer to the same test.
#[uniffi::export]
pub fn test_names_match(a: String, b: String) -> bool {
    lab::test_names_match(&a, &b)
}

/// Whether a value is provably outside its reference range.
#[uniffi::export]
pub fn is_result_abnormal(value: Option<String>, reference: Option<String>) -> bool {
    lab::is_result_abnormal(value.as_deref(), reference.as_deref())
}

/// Merge lab panels (JSON array of panels) into per-test series (JSON).
#[uniffi::export]
pub fn merge_lab_panels_json(panels_json: String) -> Result<String, ClinicalNotesError> {
    let panels: Vec<LabPanel> = serde_json::from_str(&panels_json)?;
    let series = lab::merge_panels(&panels);
    Ok(serde_json::to_string(&series)?)
}

// =========================================================================
// Questionnaires (exported to FFI)
// =========================================================================

/// True when at least one question of a built-in questionnaire is answered.
#[uniffi::export]
pub fn questionnaire_is_filled(kind: FfiQuestionnaireKind, answers: HashMap<String, String>) -> bool {
    Questionnaire::builtin(kind.into()).is_filled(&answers.into())
}

/// Total score of a built-in questionnaire.
#[uniffi::export]
pub fn questionnaire_total(kind: FfiQuestionnaireKind, answers: HashMap<String, String>) -> i64 {
    Questionnaire::builtin(kind.into()).compute_total(&answers.into())
}

/// Severity band for a total of a built-in questionnaire.
#[uniffi::export]
pub fn questionnaire_severity(kind: FfiQuestionnaireKind, total: i64, filled: bool) -> FfiSeverityBand {
    Questionnaire::builtin(kind.into())
        .classify_severity(total, filled)
        .into()
}

/// Narrative for a built-in questionnaire; `None` when nothing is filled in.
#[uniffi::export]
pub fn questionnaire_narrative(
    kind: FfiQuestionnaireKind,
    answers: HashMap<String, String>,
) -> Option<String> {
    Questionnaire::builtin(kind.into()).build_narrative(&answers.into())
}

/// Host-side handle to a questionnaire engine.
#[derive(uniffi::Object)]
pub struct QuestionnaireHandle {
    questionnaire: Questionnaire,
}

#[uniffi::export]
impl QuestionnaireHandle {
    /// Handle for a built-in questionnaire.
    #[uniffi::constructor]
    pub fn builtin(kind: FfiQuestionnaireKind) -> Arc<Self> {
        Arc::new(Self {
            questionnaire: Questionnaire::builtin(kind.into()),
        })
    }

    /// Handle for a JSON questionnaire definition.
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Arc<Self>, ClinicalNotesError> {
        Ok(Arc::new(Self {
            questionnaire: Questionnaire::from_json(&json)?,
        }))
    }

    pub fn id(&self) -> String {
        self.questionnaire.id().to_string()
    }

    pub fn max_score(&self) -> i64 {
        self.questionnaire.max_score()
    }

    pub fn is_filled(&self, answers: HashMap<String, String>) -> bool {
        self.questionnaire.is_filled(&answers.into())
    }

    pub fn compute_total(&self, answers: HashMap<String, String>) -> i64 {
        self.questionnaire.compute_total(&answers.into())
    }

    pub fn classify_severity(&self, total: i64, filled: bool) -> FfiSeverityBand {
        self.questionnaire.classify_severity(total, filled).into()
    }

    pub fn evaluate(&self, answers: HashMap<String, String>) -> FfiEvaluation {
        self.questionnaire.evaluate(&answers.into()).into()
    }

    pub fn build_narrative(&self, answers: HashMap<String, String>) -> Option<String> {
        self.questionnaire.build_narrative(&answers.into())
    }

    /// Reject unknown question keys and option codes.
    pub fn validate_answers(&self, answers: HashMap<String, String>) -> Result<(), ClinicalNotesError> {
        Ok(self.questionnaire.validate_answers(&answers.into())?)
    }

    /// Narrative plus score metadata as JSON; `None` when nothing is filled in.
    pub fn export_json(&self, answers: HashMap<String, String>) -> Result<Option<String>, ClinicalNotesError> {
        self.questionnaire
            .export(&answers.into())
            .map(|export| export.to_json())
            .transpose()
            .map_err(Into::into)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe built-in questionnaire selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiQuestionnaireKind {
    Iief5,
    Pedt,
    PeClinical,
}

impl From<FfiQuestionnaireKind> for QuestionnaireKind {
    fn from(kind: FfiQuestionnaireKind) -> Self {
        match kind {
            FfiQuestionnaireKind::Iief5 => QuestionnaireKind::Iief5,
            FfiQuestionnaireKind::Pedt => QuestionnaireKind::Pedt,
            FfiQuestionnaireKind::PeClinical => QuestionnaireKind::PeClinical,
        }
    }
}

/// FFI-safe band color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiBandColor {
    Emerald,
    Lime,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl From<BandColor> for FfiBandColor {
    fn from(color: BandColor) -> Self {
        match color {
            BandColor::Emerald => FfiBandColor::Emerald,
            BandColor::Lime => FfiBandColor::Lime,
            BandColor::Yellow => FfiBandColor::Yellow,
            BandColor::Orange => FfiBandColor::Orange,
            BandColor::Red => FfiBandColor::Red,
            BandColor::Gray => FfiBandColor::Gray,
        }
    }
}

/// FFI-safe severity band.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSeverityBand {
    pub label: String,
    pub color: FfiBandColor,
    pub evaluated: bool,
}

impl From<SeverityBand> for FfiSeverityBand {
    fn from(band: SeverityBand) -> Self {
        Self {
            label: band.label,
            color: band.color.into(),
            evaluated: band.evaluated,
        }
    }
}

/// FFI-safe evaluation snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEvaluation {
    pub filled: bool,
    pub total: i64,
    pub band: FfiSeverityBand,
}

impl From<Evaluation> for FfiEvaluation {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            filled: evaluation.filled,
            total: evaluation.total,
            band: evaluation.band.into(),
        }
    }
}
