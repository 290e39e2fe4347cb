use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::document::ReportForm;

/// In-progress form input: field name to value.
///
/// Stored as one JSON object, e.g. `{"Amt":"Finanzen","Name":"Erika"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft(BTreeMap<String, String>);

impl Draft {
    /// Captures every control of the form, hidden sections included.
    pub fn from_form(form: &ReportForm) -> Self {
        Self(form.form_data().into_iter().collect())
    }

    /// Parses a stored draft. Anything that is not a JSON object of strings
    /// yields an empty draft.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::debug!("ignoring unreadable draft: {e}");
                Self::default()
            }
        }
    }

    /// Serializes the draft to its stored JSON form.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns the saved value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[cfg(test)]
    fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Iterates over name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if nothing was saved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
