//! Runtime state of the report form: current values, option states, section
//! visibility and the feedback/notice texts.

use super::layout::{FieldSpec, FormLayout};

/// A text input with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Submission name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Current text value.
    pub value: String,
    /// Whether the field must be non-empty when visible at submission.
    pub required: bool,
    /// Free-text area instead of a single line.
    pub multiline: bool,
    /// Constraint violation message, if any.
    pub error: Option<String>,
}

impl Field {
    fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name.clone(),
            label: spec.label.clone(),
            value: String::new(),
            required: spec.required,
            multiline: spec.multiline,
            error: None,
        }
    }
}

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Submitted value; empty for the placeholder.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Disabled options cannot be chosen by the user.
    pub disabled: bool,
}

/// The category dropdown and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Submission name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Options including the leading placeholder.
    pub options: Vec<CategoryOption>,
    /// Current value; always the value of one of `options`.
    pub value: String,
    /// Whether a non-empty value is needed to submit.
    pub required: bool,
    /// Constraint violation message, if any.
    pub error: Option<String>,
}

impl Selector {
    /// Returns the option currently selected.
    pub fn selected(&self) -> Option<&CategoryOption> {
        self.options.iter().find(|o| o.value == self.value)
    }

    /// Sets the value if an option with that value exists, otherwise falls
    /// back to the placeholder.
    fn select(&mut self, value: &str) {
        let found = self.options.iter().any(|o| o.value == value);
        self.value = if found { value.to_string() } else { String::new() };
    }
}

/// A group of fields, tagged with a category or untagged (fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Owning category; `None` for the fallback section.
    pub category: Option<String>,
    /// Heading.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<Field>,
    /// Derived visibility; never persisted.
    pub visible: bool,
}

impl Section {
    /// Returns `true` for the untagged fallback section.
    pub fn is_fallback(&self) -> bool {
        self.category.is_none()
    }
}

/// The whole form as the controller sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportForm {
    title: String,
    selector: Selector,
    general: Vec<Field>,
    sections: Vec<Section>,
    feedback: String,
    feedback_visible: bool,
    notice: Option<String>,
}

impl ReportForm {
    /// Builds an empty form from its layout. All sections start hidden.
    pub fn from_layout(layout: &FormLayout) -> Self {
        let placeholder = CategoryOption {
            value: String::new(),
            label: layout.selector.placeholder.clone(),
            disabled: false,
        };
        let options = std::iter::once(placeholder)
            .chain(layout.selector.categories.iter().map(|c| CategoryOption {
                value: c.id.clone(),
                label: c.label.clone(),
                disabled: false,
            }))
            .collect();

        Self {
            title: layout.title.clone(),
            selector: Selector {
                name: layout.selector.name.clone(),
                label: layout.selector.label.clone(),
                options,
                value: String::new(),
                required: layout.selector.required,
                error: None,
            },
            general: layout.general.iter().map(Field::from_spec).collect(),
            sections: layout
                .sections
                .iter()
                .map(|s| Section {
                    category: s.category.clone(),
                    title: s.title.clone(),
                    fields: s.fields.iter().map(Field::from_spec).collect(),
                    visible: false,
                })
                .collect(),
            feedback: layout.feedback.clone(),
            feedback_visible: false,
            notice: None,
        }
    }

    /// Form heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The category selector.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Always-visible fields.
    pub fn general(&self) -> &[Field] {
        &self.general
    }

    /// All detail sections, visible or not.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Confirmation text.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Whether the confirmation is showing.
    pub fn feedback_visible(&self) -> bool {
        self.feedback_visible
    }

    /// Shows or hides the confirmation.
    pub fn set_feedback_visible(&mut self, visible: bool) {
        self.feedback_visible = visible;
    }

    /// The static notice that replaced the form content, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replaces the whole form content with a static notice.
    pub fn replace_with_notice(&mut self, notice: String) {
        self.selector.options.clear();
        self.selector.value.clear();
        self.general.clear();
        self.sections.clear();
        self.feedback_visible = false;
        self.notice = Some(notice);
    }

    /// Hides every section, tagged and fallback.
    pub fn hide_all_sections(&mut self) {
        for section in &mut self.sections {
            section.visible = false;
        }
    }

    /// Shows the section tagged with `category`. Returns `false` if there is none.
    pub fn show_section(&mut self, category: &str) -> bool {
        let mut found = false;
        for section in &mut self.sections {
            if section.category.as_deref() == Some(category) {
                section.visible = true;
                found = true;
            }
        }
        found
    }

    /// Shows the fallback section.
    pub fn show_fallback(&mut self) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.is_fallback()) {
            section.visible = true;
        }
    }

    /// Empties the fallback section's free-text field: its first multiline
    /// field, or its first field if none is multiline.
    pub fn clear_fallback_text(&mut self) {
        let Some(section) = self.sections.iter_mut().find(|s| s.is_fallback()) else {
            return;
        };
        let index = section
            .fields
            .iter()
            .position(|f| f.multiline)
            .unwrap_or(0);
        if let Some(field) = section.fields.get_mut(index) {
            field.value.clear();
        }
    }

    /// Returns the current value of the selector or field named `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        if name == self.selector.name {
            return Some(&self.selector.value);
        }
        self.fields().find(|f| f.name == name).map(|f| f.value.as_str())
    }

    /// Sets the value of the selector or field named `name` and clears its
    /// error. Returns `false` if no such control exists.
    ///
    /// A selector value without a matching option leaves the placeholder
    /// selected, like an HTML select does.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        if name == self.selector.name {
            self.selector.select(value);
            self.selector.error = None;
            return true;
        }
        match self.fields_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                field.error = None;
                true
            }
            None => false,
        }
    }

    /// Returns the field named `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|f| f.name == name)
    }

    /// All name/value pairs in document order, selector first, hidden
    /// sections included.
    pub fn form_data(&self) -> Vec<(String, String)> {
        if self.notice.is_some() {
            return Vec::new();
        }
        std::iter::once((self.selector.name.clone(), self.selector.value.clone()))
            .chain(self.fields().map(|f| (f.name.clone(), f.value.clone())))
            .collect()
    }

    /// General fields followed by the fields of visible sections.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.general.iter().chain(
            self.sections
                .iter()
                .filter(|s| s.visible)
                .flat_map(|s| s.fields.iter()),
        )
    }

    /// Restores every control to its initial value and clears all errors.
    ///
    /// Option states (disabled, relabelled) are kept.
    pub fn reset(&mut self) {
        self.selector.value.clear();
        self.selector.error = None;
        for field in self.fields_mut() {
            field.value.clear();
            field.error = None;
        }
    }

    /// Flags the selector or field named `name` with a constraint message.
    pub fn set_error(&mut self, name: &str, message: &str) {
        if name == self.selector.name {
            self.selector.error = Some(message.to_string());
        } else if let Some(field) = self.fields_mut().find(|f| f.name == name) {
            field.error = Some(message.to_string());
        }
    }

    /// Clears all constraint messages.
    pub fn clear_errors(&mut self) {
        self.selector.error = None;
        for field in self.fields_mut() {
            field.error = None;
        }
    }

    /// Names of the controls that violate their `required` constraint.
    ///
    /// Hidden sections are not checked.
    pub fn missing_required(&self) -> Vec<String> {
        let selector = (self.selector.required && self.selector.value.is_empty())
            .then(|| self.selector.name.clone());
        selector
            .into_iter()
            .chain(
                self.visible_fields()
                    .filter(|f| f.required && f.value.trim().is_empty())
                    .map(|f| f.name.clone()),
            )
            .collect()
    }

    /// Disables the option whose value or label equals `category` and
    /// appends `suffix` to its label. Already disabled options are left
    /// alone. Returns `true` if an option changed.
    pub fn mark_submitted(&mut self, category: &str, suffix: &str) -> bool {
        let Some(option) = self
            .selector
            .options
            .iter_mut()
            .filter(|o| !o.value.is_empty())
            .find(|o| o.value == category || o.label == category)
        else {
            return false;
        };
        if option.disabled {
            return false;
        }
        option.disabled = true;
        option.label.push_str(suffix);
        true
    }

    /// Returns `true` if `value` names an option the user may pick.
    pub fn is_selectable(&self, value: &str) -> bool {
        self.selector
            .options
            .iter()
            .any(|o| o.value == value && !o.disabled)
    }

    /// The value of the next (or previous) selectable option after the
    /// current one, wrapping around. Disabled options are skipped.
    pub fn cycle_option(&self, forward: bool) -> Option<&str> {
        let options = &self.selector.options;
        if options.is_empty() {
            return None;
        }
        let len = options.len();
        let current = options
            .iter()
            .position(|o| o.value == self.selector.value)
            .unwrap_or(0);
        (1..len)
            .map(|step| {
                if forward {
                    (current + step) % len
                } else {
                    (current + len - step) % len
                }
            })
            .map(|i| &options[i])
            .find(|o| !o.disabled)
            .map(|o| o.value.as_str())
    }

    fn fields(&self) -> impl Iterator<Item = &Field> {
        self.general
            .iter()
            .chain(self.sections.iter().flat_map(|s| s.fields.iter()))
    }

    fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.general
            .iter_mut()
            .chain(self.sections.iter_mut().flat_map(|s| s.fields.iter_mut()))
    }
}
