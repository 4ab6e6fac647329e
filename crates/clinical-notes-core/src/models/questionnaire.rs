//! Questionnaire definitions, answers and severity models.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Label reported when an answer set has nothing filled in.
pub const NOT_EVALUATED_LABEL: &str = "Değerlendirilmedi";

/// Full configuration of one questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionnaireDefinition {
    /// Stable identifier (e.g., "pedt")
    pub id: String,
    /// Display name, `{name}` in the summary template (e.g., "PEDT")
    pub name: String,
    /// Prefix placed before the narrative sentences
    pub header: String,
    /// Questions in narrative order
    pub questions: Vec<QuestionDefinition>,
    /// Maximum reachable score, the summary denominator
    pub max_score: i64,
    /// Summary sentence; interpolates `{name}`, `{total}`, `{max}`, `{label}`
    pub summary_template: String,
    /// Severity thresholds, any order
    pub thresholds: Vec<SeverityThreshold>,
}

/// One question and its answer vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionDefinition {
    pub key: String,
    pub options: Vec<AnswerOption>,
    /// Sentence template; interpolates `{label}` and `{code}`
    pub template: String,
    /// Alternative sentence used for specific codes (e.g., a "none" answer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<AlternateTemplate>,
}

impl QuestionDefinition {
    /// Label fragment for a code, if the code is in the table.
    pub fn label_for(&self, code: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.code == code)
            .map(|o| o.label.as_str())
    }
}

/// A selectable option: code plus the fragment used in sentences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerOption {
    pub code: String,
    pub label: String,
}

impl AnswerOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Template override for a subset of codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternateTemplate {
    pub codes: Vec<String>,
    pub template: String,
}

/// Inclusive lower bound of a severity band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeverityThreshold {
    pub min: i64,
    pub label: String,
    pub color: BandColor,
}

impl SeverityThreshold {
    pub fn new(min: i64, label: impl Into<String>, color: BandColor) -> Self {
        Self {
            min,
            label: label.into(),
            color,
        }
    }
}

/// Display color tag for a severity band. Interpreted by the UI only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BandColor {
    Emerald,
    Lime,
    Yellow,
    Orange,
    Red,
    /// Used by the "not evaluated" band
    Gray,
}

/// A classified severity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeverityBand {
    pub label: String,
    pub color: BandColor,
    /// False only for the "not evaluated" sentinel
    pub evaluated: bool,
}

impl SeverityBand {
    /// The sentinel band for an empty answer set.
    pub fn not_evaluated() -> Self {
        Self {
            label: NOT_EVALUATED_LABEL.to_string(),
            color: BandColor::Gray,
            evaluated: false,
        }
    }
}

impl From<&SeverityThreshold> for SeverityBand {
    fn from(threshold: &SeverityThreshold) -> Self {
        Self {
            label: threshold.label.clone(),
            color: threshold.color,
            evaluated: true,
        }
    }
}

/// Selected option code per question key. Empty string means unanswered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) the answer for a key.
    pub fn set(&mut self, key: impl Into<String>, code: impl Into<String>) {
        self.0.insert(key.into(), code.into());
    }

    /// Builder-style [`AnswerSet::set`].
    pub fn with(mut self, key: impl Into<String>, code: impl Into<String>) -> Self {
        self.set(key, code);
        self
    }

    /// Answer for a key; unanswered and missing keys both yield `""`.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Reset every answer.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// True when no key holds a non-empty code.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<HashMap<String, String>> for AnswerSet {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<AnswerSet> for HashMap<String, String> {
    fn from(answers: AnswerSet) -> Self {
        answers.0.into_iter().collect()
    }
}

/// Snapshot of filled flag, total and band for one answer set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    pub filled: bool,
    pub total: i64,
    pub band: SeverityBand,
}

/// A narrative ready to be appended to a clinical note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NarrativeExport {
    pub questionnaire_id: String,
    pub narrative: String,
    pub total: i64,
    pub max_score: i64,
    pub band: SeverityBand,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

impl NarrativeExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Built-in questionnaires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireKind {
    /// International Index of Erectile Function, 5-item form
    Iief5,
    /// Premature Ejaculation Diagnostic Tool
    Pedt,
    /// Free-form clinical premature ejaculation assessment
    PeClinical,
}

impl QuestionnaireKind {
    pub const ALL: [QuestionnaireKind; 3] = [Self::Iief5, Self::Pedt, Self::PeClinical];

    /// Registry identifier of the built-in definition.
    pub fn id(self) -> &'static str {
        match self {
            Self::Iief5 => "iief5",
            Self::Pedt => "pedt",
            Self::PeClinical => "pe_clinical",
        }
    }
}

/// Answers tagged with the questionnaire they belong to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "answers", rename_all = "snake_case")]
pub enum QuestionnaireForm {
    Iief5(AnswerSet),
    Pedt(AnswerSet),
    PeClinical(AnswerSet),
}

impl QuestionnaireForm {
    pub fn kind(&self) -> QuestionnaireKind {
        match self {
            Self::Iief5(_) => QuestionnaireKind::Iief5,
            Self::Pedt(_) => QuestionnaireKind::Pedt,
            Self::PeClinical(_) => QuestionnaireKind::PeClinical,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        match self {
            Self::Iief5(a) | Self::Pedt(a) | Self::PeClinical(a) => a,
        }
    }
}
