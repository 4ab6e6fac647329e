//! Generic questionnaire engine.

use std::collections::HashSet;

use crate::models::{
    AnswerSet, Evaluation, NarrativeExport, QuestionDefinition, QuestionnaireDefinition,
    QuestionnaireKind, SeverityBand,
};

use super::{NarrativeError, NarrativeResult};

/// A validated questionnaire definition with its scoring and narrative rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    definition: QuestionnaireDefinition,
}

impl Questionnaire {
    /// Validate a definition and build an engine from it.
    ///
    /// Thresholds are stored highest lower bound first.
    pub fn new(definition: QuestionnaireDefinition) -> NarrativeResult<Self> {
        validate_definition(&definition)?;
        Ok(Self::sorted(definition))
    }

    /// Engine for a built-in questionnaire.
    pub fn builtin(kind: QuestionnaireKind) -> Self {
        Self::sorted(kind.definition())
    }

    /// Parse a JSON definition and build an engine from it.
    pub fn from_json(json: &str) -> NarrativeResult<Self> {
        let definition: QuestionnaireDefinition = serde_json::from_str(json)?;
        Self::new(definition)
    }

    fn sorted(mut definition: QuestionnaireDefinition) -> Self {
        definition.thresholds.sort_by(|a, b| b.min.cmp(&a.min));
        Self { definition }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn definition(&self) -> &QuestionnaireDefinition {
        &self.definition
    }

    /// Maximum reachable score.
    pub fn max_score(&self) -> i64 {
        self.definition.max_score
    }

    /// True when at least one question holds a non-empty answer.
    pub fn is_filled(&self, answers: &AnswerSet) -> bool {
        self.definition
            .questions
            .iter()
            .any(|q| !answers.get(&q.key).is_empty())
    }

    /// Sum of numeric answer codes. Unanswered or non-numeric codes count 0.
    pub fn compute_total(&self, answers: &AnswerSet) -> i64 {
        self.definition
            .questions
            .iter()
            .map(|q| parse_code(answers.get(&q.key)))
            .fold(0i64, i64::saturating_add)
    }

    /// Classify a total into a severity band.
    ///
    /// An unfilled answer set always yields the "not evaluated" band, whatever
    /// the total. A total below every threshold falls into the lowest band.
    pub fn classify_severity(&self, total: i64, filled: bool) -> SeverityBand {
        if !filled {
            return SeverityBand::not_evaluated();
        }

        let thresholds = &self.definition.thresholds;
        thresholds
            .iter()
            .find(|t| t.min <= total)
            .or_else(|| thresholds.last())
            .map(SeverityBand::from)
            .unwrap_or_else(SeverityBand::not_evaluated)
    }

    /// Filled flag, total and band in one pass.
    pub fn evaluate(&self, answers: &AnswerSet) -> Evaluation {
        let filled = self.is_filled(answers);
        let total = self.compute_total(answers);
        Evaluation {
            filled,
            total,
            band: self.classify_severity(total, filled),
        }
    }

    /// Build the narrative for an answer set.
    ///
    /// Returns `None` when nothing is filled in. Otherwise: the header, one
    /// sentence per answered question in definition order, and one summary
    /// sentence with the total, maximum and severity label.
    pub fn build_narrative(&self, answers: &AnswerSet) -> Option<String> {
        let evaluation = self.evaluate(answers);
        if !evaluation.filled {
            return None;
        }

        let mut sentences = vec![self.definition.header.clone()];

        for question in &self.definition.questions {
            let code = answers.get(&question.key);
            if code.is_empty() {
                continue;
            }
            sentences.push(sentence_for(question, code));
        }

        let total = evaluation.total.to_string();
        let max = self.definition.max_score.to_string();
        sentences.push(render(
            &self.definition.summary_template,
            &[
                ("name", self.definition.name.as_str()),
                ("total", total.as_str()),
                ("max", max.as_str()),
                ("label", evaluation.band.label.as_str()),
            ],
        ));

        Some(sentences.join(" "))
    }

    /// Build the narrative and hand it to `append`.
    ///
    /// `append` is only called when a narrative exists. Returns whether the
    /// export happened.
    pub fn handle_export<F>(&self, answers: &AnswerSet, append: F) -> bool
    where
        F: FnOnce(&str),
    {
        match self.build_narrative(answers) {
            Some(narrative) => {
                append(&narrative);
                true
            }
            None => {
                tracing::debug!(questionnaire = %self.definition.id, "nothing filled in, export skipped");
                false
            }
        }
    }

    /// Narrative plus score metadata, stamped with the generation time.
    pub fn export(&self, answers: &AnswerSet) -> Option<NarrativeExport> {
        let narrative = self.build_narrative(answers)?;
        let evaluation = self.evaluate(answers);

        Some(NarrativeExport {
            questionnaire_id: self.definition.id.clone(),
            narrative,
            total: evaluation.total,
            max_score: self.definition.max_score,
            band: evaluation.band,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Strict check that every answered key and code is in the definition.
    ///
    /// The scoring and narrative operations never call this; they skip what
    /// they do not know.
    pub fn validate_answers(&self, answers: &AnswerSet) -> NarrativeResult<()> {
        for (key, code) in answers.iter() {
            let question = self
                .definition
                .questions
                .iter()
                .find(|q| q.key == key)
                .ok_or_else(|| NarrativeError::UnknownQuestion(key.to_string()))?;

            if !code.is_empty() && question.label_for(code).is_none() {
                return Err(NarrativeError::UnknownOption {
                    question: key.to_string(),
                    code: code.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn sentence_for(question: &QuestionDefinition, code: &str) -> String {
    // Codes missing from the table are reported verbatim
    let label = question.label_for(code).unwrap_or(code);

    let template = question
        .alternate
        .as_ref()
        .filter(|alt| alt.codes.iter().any(|c| c == code))
        .map(|alt| alt.template.as_str())
        .unwrap_or(&question.template);

    render(template, &[("label", label), ("code", code)])
}

/// Leading integer of a code, like `parseInt`; anything else is 0.
///
/// Digit runs too long for `i64` saturate instead of wrapping or dropping to 0.
fn parse_code(code: &str) -> i64 {
    let trimmed = code.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let run = &digits[..end];
    if run.is_empty() {
        return 0;
    }

    match run.parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) if sign < 0 => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Substitute `{name}` placeholders in one pass. Unknown placeholders stay as written.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

fn validate_definition(definition: &QuestionnaireDefinition) -> NarrativeResult<()> {
    let invalid = |msg: String| Err(NarrativeError::InvalidDefinition(msg));

    if definition.id.trim().is_empty() {
        return invalid("empty id".into());
    }
    if definition.header.trim().is_empty() {
        return invalid(format!("{}: empty header", definition.id));
    }
    if definition.questions.is_empty() {
        return invalid(format!("{}: no questions", definition.id));
    }
    if definition.thresholds.is_empty() {
        return invalid(format!("{}: no severity thresholds", definition.id));
    }
    if definition.max_score < 0 {
        return invalid(format!("{}: negative max score", definition.id));
    }

    let mut keys = HashSet::new();
    for question in &definition.questions {
        if question.key.is_empty() {
            return invalid(format!("{}: question with empty key", definition.id));
        }
        if !keys.insert(question.key.as_str()) {
            return invalid(format!("{}: duplicate question key '{}'", definition.id, question.key));
        }

        let mut codes = HashSet::new();
        for option in &question.options {
            if !codes.insert(option.code.as_str()) {
                return invalid(format!(
                    "{}: duplicate code '{}' in question '{}'",
                    definition.id, option.code, question.key
                ));
            }
        }
    }

    Ok(())
}
