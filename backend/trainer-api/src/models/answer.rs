use super::Scenario;

/// Answers for one submission, ordered like the scenario's questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedAnswers {
    entries: Vec<(String, String)>,
}

impl SubmittedAnswers {
    /// Picks one trimmed answer per question out of the raw form fields, in
    /// body order. A repeated field keeps its first value, missing fields
    /// become empty strings, and fields with no matching question are dropped.
    pub fn from_form(scenario: &Scenario, form: &[(String, String)]) -> Self {
        let entries = scenario
            .question_ids()
            .map(|id| {
                let text = form
                    .iter()
                    .find(|(name, _)| name == id)
                    .map(|(_, value)| value.trim())
                    .unwrap_or_default();
                (id.to_string(), text.to_string())
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, text)| (id.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
