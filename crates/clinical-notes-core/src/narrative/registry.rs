//! Questionnaire registry: the set of definitions a host works with.
//!
//! The registry is plain configuration owned by the caller and passed by
//! reference; there is no process-wide instance.

use std::collections::BTreeMap;

use crate::models::{AnswerSet, QuestionnaireDefinition, QuestionnaireForm, QuestionnaireKind};

use super::{NarrativeError, NarrativeResult, Questionnaire};

/// Questionnaires keyed by id.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireRegistry {
    questionnaires: BTreeMap<String, Questionnaire>,
}

impl QuestionnaireRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in questionnaire.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for kind in QuestionnaireKind::ALL {
            registry.insert(Questionnaire::builtin(kind));
        }
        registry
    }

    /// Validate and add a definition, replacing any with the same id.
    pub fn register(&mut self, definition: QuestionnaireDefinition) -> NarrativeResult<&Questionnaire> {
        let questionnaire = Questionnaire::new(definition)?;
        Ok(self.insert(questionnaire))
    }

    /// Parse a JSON definition and register it.
    pub fn register_json(&mut self, json: &str) -> NarrativeResult<&Questionnaire> {
        let definition: QuestionnaireDefinition = serde_json::from_str(json)?;
        self.register(definition)
    }

    fn insert(&mut self, questionnaire: Questionnaire) -> &Questionnaire {
        let id = questionnaire.id().to_string();
        if self.questionnaires.contains_key(&id) {
            tracing::debug!(questionnaire = %id, "replacing registered questionnaire");
        }
        self.questionnaires.insert(id.clone(), questionnaire);
        &self.questionnaires[&id]
    }

    /// Look up a questionnaire by id.
    pub fn get(&self, id: &str) -> NarrativeResult<&Questionnaire> {
        self.questionnaires
            .get(id)
            .ok_or_else(|| NarrativeError::UnknownQuestionnaire(id.to_string()))
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        self.questionnaires.keys().map(String::as_str).collect()
    }

    /// Questionnaire and answers for a tagged form.
    pub fn resolve<'a>(&'a self, form: &'a QuestionnaireForm) -> NarrativeResult<(&'a Questionnaire, &'a AnswerSet)> {
        Ok((self.get(form.kind().id())?, form.answers()))
    }
}
