//! Declarative description of the report form: selector, general fields and
//! per-category detail sections.

use serde::{Deserialize, Serialize};

use super::validation::{LayoutError, validate_layout};

/// One input field of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Submission name; also the key in the saved draft.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether the field must be non-empty when visible at submission.
    #[serde(default)]
    pub required: bool,
    /// Free-text area instead of a single line.
    #[serde(default)]
    pub multiline: bool,
}

impl FieldSpec {
    /// An optional single-line text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            multiline: false,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Turns the field into a multiline text area.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

/// A reportable category ("Amt").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Identifier sent to the backend and used to tag sections.
    pub id: String,
    /// Display label in the selector.
    pub label: String,
}

impl CategorySpec {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The category dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSpec {
    /// Submission name of the selector.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Label of the empty placeholder option.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Whether a category must be chosen before submitting.
    #[serde(default = "default_true")]
    pub required: bool,
    /// Selectable categories, in display order.
    pub categories: Vec<CategorySpec>,
}

fn default_placeholder() -> String {
    "-- bitte wählen --".into()
}

fn default_true() -> bool {
    true
}

/// A group of fields shown for one category, or the untagged fallback
/// section shown for every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Category this section belongs to; `None` marks the fallback section.
    #[serde(default)]
    pub category: Option<String>,
    /// Section heading.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
}

/// Complete form description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLayout {
    /// Form heading.
    pub title: String,
    /// The category selector.
    pub selector: SelectorSpec,
    /// Always-visible fields.
    #[serde(default)]
    pub general: Vec<FieldSpec>,
    /// Detail sections, tagged and fallback.
    pub sections: Vec<SectionSpec>,
    /// Confirmation text shown after a successful submission.
    pub feedback: String,
}

impl FormLayout {
    /// Checks the structural invariants. See [`validate_layout`].
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_layout(self)
    }
}

impl Default for FormLayout {
    fn default() -> Self {
        Self {
            title: "Monatsbericht".into(),
            selector: SelectorSpec {
                name: "Amt".into(),
                label: "Amt".into(),
                placeholder: default_placeholder(),
                required: true,
                categories: vec![
                    CategorySpec::new("Finanzen", "Finanzen"),
                    CategorySpec::new("Jugend", "Jugendarbeit"),
                    CategorySpec::new("Presse", "Presse- und Öffentlichkeitsarbeit"),
                    CategorySpec::new("Schriftfuehrung", "Schriftführung"),
                ],
            },
            general: vec![
                FieldSpec::text("Name", "Name").required(),
                FieldSpec::text("Email", "E-Mail"),
            ],
            sections: vec![
                SectionSpec {
                    category: Some("Finanzen".into()),
                    title: "Finanzen".into(),
                    fields: vec![
                        FieldSpec::text("Kassenstand", "Kassenstand (EUR)").required(),
                        FieldSpec::text("Ausgaben", "Größere Ausgaben").multiline(),
                    ],
                },
                SectionSpec {
                    category: Some("Jugend".into()),
                    title: "Jugendarbeit".into(),
                    fields: vec![
                        FieldSpec::text("Veranstaltungen", "Veranstaltungen").multiline(),
                        FieldSpec::text("Teilnehmende", "Teilnehmende gesamt"),
                    ],
                },
                SectionSpec {
                    category: Some("Presse".into()),
                    title: "Presse- und Öffentlichkeitsarbeit".into(),
                    fields: vec![
                        FieldSpec::text("Beitraege", "Veröffentlichte Beiträge").multiline(),
                    ],
                },
                SectionSpec {
                    category: Some("Schriftfuehrung".into()),
                    title: "Schriftführung".into(),
                    fields: vec![
                        FieldSpec::text("Protokolle", "Erstellte Protokolle"),
                        FieldSpec::text("Termine", "Anstehende Termine").multiline(),
                    ],
                },
                SectionSpec {
                    category: None,
                    title: "Sonstiges".into(),
                    fields: vec![FieldSpec::text("Sonstiges", "Sonstiges").multiline()],
                },
            ],
            feedback: "Vielen Dank! Der Bericht wurde übermittelt.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_flags() {
        let field = FieldSpec::text("a", "A").required().multiline();
        assert!(field.required);
        assert!(field.multiline);
    }

    #[test]
    fn plain_text_field_is_optional_single_line() {
        let field = FieldSpec::text("a", "A");
        assert!(!field.required);
        assert!(!field.multiline);
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "title": "Bericht",
            "selector": {
                "name": "Amt",
                "label": "Amt",
                "categories": [{ "id": "Finance", "label": "Finance" }]
            },
            "sections": [
                { "category": "Finance", "title": "Finance",
                  "fields": [{ "name": "balance", "label": "Balance" }] },
                { "title": "Other", "fields": [{ "name": "other", "label": "Other", "multiline": true }] }
            ],
            "feedback": "Danke"
        }"#;
        let layout: FormLayout = serde_json::from_str(json).unwrap();
        assert!(layout.general.is_empty());
        assert!(layout.selector.required);
        assert_eq!(layout.selector.placeholder, "-- bitte wählen --");
        assert_eq!(layout.sections[1].category, None);
        assert!(layout.sections[1].fields[0].multiline);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn default_layout_has_single_fallback_last() {
        let layout = FormLayout::default();
        let fallbacks: Vec<_> = layout
            .sections
            .iter()
            .filter(|s| s.category.is_none())
            .collect();
        assert_eq!(fallbacks.len(), 1);
        assert!(layout.sections.last().unwrap().category.is_none());
    }
}
